use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataUnavailable;
use super::model::{Category, Dataset, Day, Row, Sex, Smoker, Time, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// DatasetSource – cached, change-aware access to the backing file
// ---------------------------------------------------------------------------

/// Modification state of the backing file. A change in either field
/// invalidates the cached dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

/// Loads the dataset from a file and re-reads it only when the file changes.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    cached: Option<(FileStamp, Arc<Dataset>)>,
    /// Stamp of the last file content that failed to load.
    failed: Option<FileStamp>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
            failed: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the dataset, reading the file only if it changed since the
    /// last successful load.
    pub fn load(&mut self) -> Result<Arc<Dataset>, DataUnavailable> {
        let stamp = self.stamp()?;
        if let Some((cached_stamp, dataset)) = &self.cached {
            if *cached_stamp == stamp {
                return Ok(Arc::clone(dataset));
            }
        }

        let dataset = match load_file(&self.path) {
            Ok(dataset) => Arc::new(dataset),
            Err(e) => {
                self.failed = Some(stamp);
                return Err(e);
            }
        };
        self.failed = None;
        log::info!(
            "Loaded {} rows from {}",
            dataset.len(),
            self.path.display()
        );
        self.cached = Some((stamp, Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// `Some(dataset)` if the file changed and was re-read, `None` if the
    /// cached copy is still current. A file that failed to load is not
    /// read again until it changes.
    pub fn reload_if_changed(&mut self) -> Result<Option<Arc<Dataset>>, DataUnavailable> {
        let stamp = self.stamp()?;
        if self.failed == Some(stamp) {
            return Ok(None);
        }
        match &self.cached {
            Some((cached_stamp, _)) if *cached_stamp == stamp => Ok(None),
            _ => self.load().map(Some),
        }
    }

    fn stamp(&self) -> Result<FileStamp, DataUnavailable> {
        let meta = std::fs::metadata(&self.path)
            .map_err(|_| DataUnavailable::Missing(self.path.clone()))?;
        Ok(FileStamp {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tips dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required columns (extra columns ignored)
/// * `.json`    – `[{ "total_bill": 16.99, "tip": 1.01, "sex": "Female", ... }, ...]`
/// * `.parquet` – flat columns, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<Dataset, DataUnavailable> {
    if !path.is_file() {
        return Err(DataUnavailable::Missing(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DataUnavailable::Unsupported(other.to_string())),
    };

    rows.and_then(|rows| {
        for (row_no, row) in rows.iter().enumerate() {
            validate(row, row_no)?;
        }
        Ok(Dataset::new(rows))
    })
    .map_err(|cause| DataUnavailable::Malformed {
        path: path.to_path_buf(),
        cause,
    })
}

fn validate(row: &Row, row_no: usize) -> Result<()> {
    if !row.total_bill.is_finite() || !row.tip.is_finite() {
        bail!("Row {row_no}: total_bill and tip must be finite numbers");
    }
    if row.size < 1 {
        bail!("Row {row_no}: party size must be at least 1");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    reader
        .deserialize::<Row>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema: float `total_bill` and `tip`, string (or dictionary of
/// string) category columns, whole-number `size` of any numeric type.
/// Columns are cast to a common type so files written by Pandas and Polars
/// both load.
fn load_parquet(path: &Path) -> Result<Vec<Row>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, rows.len(), &mut rows)?;
    }
    Ok(rows)
}

fn read_batch(batch: &RecordBatch, offset: usize, rows: &mut Vec<Row>) -> Result<()> {
    let bills = column_as(batch, "total_bill", &DataType::Float64)?;
    let tips = column_as(batch, "tip", &DataType::Float64)?;
    let sexes = column_as(batch, Sex::COLUMN, &DataType::Utf8)?;
    let smokers = column_as(batch, Smoker::COLUMN, &DataType::Utf8)?;
    let days = column_as(batch, Day::COLUMN, &DataType::Utf8)?;
    let times = column_as(batch, Time::COLUMN, &DataType::Utf8)?;
    // Read as float so a fractional size is rejected rather than truncated.
    let sizes = column_as(batch, "size", &DataType::Float64)?;

    let bills = bills.as_primitive::<Float64Type>();
    let tips = tips.as_primitive::<Float64Type>();
    let sizes = sizes.as_primitive::<Float64Type>();

    for i in 0..batch.num_rows() {
        let row_no = offset + i;
        let size = party_size_at(sizes, i, row_no)?;
        rows.push(Row {
            total_bill: float_at(bills, i, row_no, "total_bill")?,
            tip: float_at(tips, i, row_no, "tip")?,
            sex: category_at(sexes.as_string::<i32>(), i, row_no)?,
            smoker: category_at(smokers.as_string::<i32>(), i, row_no)?,
            day: category_at(days.as_string::<i32>(), i, row_no)?,
            time: category_at(times.as_string::<i32>(), i, row_no)?,
            size,
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn column_as(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
    cast(batch.column(idx), to)
        .with_context(|| format!("column '{name}' cannot be read as {to:?}"))
}

fn float_at(arr: &Float64Array, i: usize, row_no: usize, col: &str) -> Result<f64> {
    if arr.is_null(i) {
        bail!("Row {row_no}: '{col}' is null or not a number");
    }
    Ok(arr.value(i))
}

fn party_size_at(arr: &Float64Array, i: usize, row_no: usize) -> Result<u32> {
    let size = float_at(arr, i, row_no, "size")?;
    if size.fract() != 0.0 {
        bail!("Row {row_no}: party size {size} is not an integer");
    }
    if !(0.0..=f64::from(u32::MAX)).contains(&size) {
        bail!("Row {row_no}: party size {size} out of range");
    }
    Ok(size as u32)
}

fn category_at<C: Category>(arr: &StringArray, i: usize, row_no: usize) -> Result<C> {
    if arr.is_null(i) {
        bail!("Row {row_no}: '{}' is null", C::COLUMN);
    }
    let label = arr.value(i);
    C::parse(label).with_context(|| {
        format!("Row {row_no}: unknown '{}' value '{label}'", C::COLUMN)
    })
}
