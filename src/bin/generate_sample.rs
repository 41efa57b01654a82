use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const N_ROWS: usize = 244;

#[derive(Debug, Serialize)]
struct TipRecord {
    total_bill: f64,
    tip: f64,
    sex: &'static str,
    smoker: &'static str,
    day: &'static str,
    time: &'static str,
    size: i64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<T: Copy>(&mut self, weighted: &[(T, f64)]) -> T {
        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        let mut r = self.next_f64() * total;
        for &(v, w) in weighted {
            if r < w {
                return v;
            }
            r -= w;
        }
        weighted[weighted.len() - 1].0
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(rng: &mut SimpleRng) -> Vec<TipRecord> {
    (0..N_ROWS)
        .map(|_| {
            let day = rng.pick(&[("Thur", 62.0), ("Fri", 19.0), ("Sat", 87.0), ("Sun", 76.0)]);
            // Thursday is mostly lunch, weekends are all dinner.
            let time = match day {
                "Thur" => rng.pick(&[("Lunch", 61.0), ("Dinner", 1.0)]),
                "Fri" => rng.pick(&[("Lunch", 7.0), ("Dinner", 12.0)]),
                _ => "Dinner",
            };
            let size: i64 = rng.pick(&[(1, 4.0), (2, 156.0), (3, 38.0), (4, 37.0), (5, 5.0), (6, 4.0)]);
            let total_bill = round2(rng.gauss(8.0 + 5.5 * size as f64, 6.0).clamp(3.07, 50.81));
            let tip = round2(rng.gauss(0.92 + 0.105 * total_bill, 0.9).max(1.0));

            TipRecord {
                total_bill,
                tip,
                sex: rng.pick(&[("Male", 157.0), ("Female", 87.0)]),
                smoker: rng.pick(&[("Yes", 93.0), ("No", 151.0)]),
                day,
                time,
                size,
            }
        })
        .collect()
}

fn write_csv(path: &str, records: &[TipRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, records: &[TipRecord]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("total_bill", DataType::Float64, false),
        Field::new("tip", DataType::Float64, false),
        Field::new("sex", DataType::Utf8, false),
        Field::new("smoker", DataType::Utf8, false),
        Field::new("day", DataType::Utf8, false),
        Field::new("time", DataType::Utf8, false),
        Field::new("size", DataType::Int64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.total_bill))),
        Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.tip))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.sex))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.smoker))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.day))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.time))),
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.size))),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    write_csv("tips.csv", &records)?;
    write_parquet("tips.parquet", &records)?;

    println!("Written {} rows to tips.csv and tips.parquet", records.len());
    Ok(())
}
