use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::color::ColorMap;
use crate::data::error::DataUnavailable;
use crate::data::filter::{self, FilterState, Interval};
use crate::data::loader::DatasetSource;
use crate::data::model::{CategoryColumn, Dataset, Day, Row, Sex, Smoker, Time};
use crate::data::stats::{summarize, SummaryStats};
use crate::data::trend::{fit, TrendLine};

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// One committed change to a filter control.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    BillRange(Interval<f64>),
    SizeRange(Interval<u32>),
    Time(BTreeSet<Time>),
    Sex(BTreeSet<Sex>),
    Smoker(BTreeSet<Smoker>),
    Day(BTreeSet<Day>),
    Reset,
}

/// Cloneable handle the widgets use to post filter changes.
#[derive(Debug, Clone)]
pub struct FilterInput {
    tx: Sender<FilterEvent>,
}

impl FilterInput {
    pub fn send(&self, event: FilterEvent) {
        // The receiver lives in AppState, so this only fails during teardown.
        if self.tx.send(event).is_err() {
            log::debug!("filter event dropped: session closed");
        }
    }

    pub fn reset(&self) {
        self.send(FilterEvent::Reset);
    }
}

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// Everything recomputed from (dataset, filters). Plain data only.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    /// Rows passing the filters, in dataset order.
    pub rows: Vec<Row>,
    pub summary: Option<SummaryStats>,
    pub trend: Option<TrendLine>,
    /// Incremented on every recomputation.
    pub generation: u64,
}

impl DerivedView {
    pub fn compute(dataset: &Dataset, filters: &FilterState, generation: u64) -> Self {
        let rows = filter::apply(dataset, filters);
        let summary = summarize(&rows);
        let trend = fit(&rows);
        DerivedView {
            rows,
            summary,
            trend,
            generation,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One dashboard session, independent of rendering.
pub struct AppState {
    /// Backing file, polled for changes. `None` for in-memory datasets.
    source: Option<DatasetSource>,

    /// Loaded dataset, shareable read-only across sessions.
    dataset: Arc<Dataset>,

    /// Current filter control values.
    filters: FilterState,

    /// Outputs for the current dataset and filters (cached).
    view: DerivedView,

    events_tx: Sender<FilterEvent>,
    events_rx: Receiver<FilterEvent>,

    reload_interval: Duration,
    last_poll: Instant,

    /// Which category column colours the scatter points.
    pub color_column: Option<CategoryColumn>,

    /// Active colour map.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start a session over an already loaded dataset with default filters.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filters = FilterState::default();
        let view = DerivedView::compute(&dataset, &filters, 0);
        let (events_tx, events_rx) = unbounded();
        Self {
            source: None,
            dataset,
            filters,
            view,
            events_tx,
            events_rx,
            reload_interval: Duration::from_secs(1),
            last_poll: Instant::now(),
            color_column: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Open the file behind `source` and start a session over it.
    pub fn open(mut source: DatasetSource, reload_interval: Duration) -> Result<Self, DataUnavailable> {
        let dataset = source.load()?;
        let mut state = Self::new(dataset);
        state.source = Some(source);
        state.reload_interval = reload_interval;
        Ok(state)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|s| s.path())
    }

    /// Handle for posting filter changes.
    pub fn input(&self) -> FilterInput {
        FilterInput {
            tx: self.events_tx.clone(),
        }
    }

    /// Apply every pending event, recomputing once per event.
    /// Returns the number of events processed.
    pub fn process_events(&mut self) -> usize {
        let events: Vec<FilterEvent> = self.events_rx.try_iter().collect();
        let n = events.len();
        for event in events {
            self.apply_event(event);
        }
        n
    }

    fn apply_event(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::BillRange(r) => self.filters.bill_range = Interval::new(r.min, r.max),
            FilterEvent::SizeRange(r) => self.filters.size_range = Interval::new(r.min, r.max),
            FilterEvent::Time(s) => self.filters.time_selection = s,
            FilterEvent::Sex(s) => self.filters.sex_selection = s,
            FilterEvent::Smoker(s) => self.filters.smoker_selection = s,
            FilterEvent::Day(s) => self.filters.day_selection = s,
            FilterEvent::Reset => {
                self.reset();
                return;
            }
        }
        self.recompute();
    }

    /// Restore the default filters and recompute.
    pub fn reset(&mut self) {
        self.filters = filter::reset();
        log::info!("Filters reset to defaults");
        self.recompute();
    }

    /// Rerun filter → summary → trend for the current dataset and filters.
    pub fn recompute(&mut self) {
        self.view = DerivedView::compute(&self.dataset, &self.filters, self.view.generation + 1);
        log::debug!(
            "Recomputed view #{}: {} of {} rows visible",
            self.view.generation,
            self.view.rows.len(),
            self.dataset.len()
        );
    }

    /// Swap in a new dataset, keeping the current filters.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.dataset = dataset;
        self.status_message = None;
        self.recompute();
    }

    /// Check the backing file for changes, at most once per reload interval.
    /// Returns `true` if a new dataset was swapped in.
    pub fn poll_source(&mut self) -> bool {
        if self.last_poll.elapsed() < self.reload_interval {
            return false;
        }
        self.refresh_source()
    }

    /// Check the backing file for changes now. A failed reload keeps the
    /// current dataset and reports the error in `status_message`.
    pub fn refresh_source(&mut self) -> bool {
        self.last_poll = Instant::now();
        let Some(source) = self.source.as_mut() else {
            return false;
        };
        match source.reload_if_changed() {
            Ok(Some(dataset)) => {
                log::info!("Dataset changed on disk, reloaded {} rows", dataset.len());
                self.set_dataset(dataset);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Reload failed, keeping previous data: {e}");
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    /// Switch to a different dataset file.
    pub fn open_path(&mut self, path: &Path) {
        let mut source = DatasetSource::new(path);
        match source.load() {
            Ok(dataset) => {
                self.source = Some(source);
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Set (or clear) the colour column and rebuild the map.
    pub fn set_color_column(&mut self, column: Option<CategoryColumn>) {
        self.color_column = column;
        self.color_map = column.map(ColorMap::new);
    }
}
