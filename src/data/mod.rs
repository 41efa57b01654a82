/// Data layer: core types, loading, filtering and derived statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌───────────────┐
///   │ DatasetSource │  parse file → Dataset, re-read on change
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicates → filtered rows
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  stats    │   │  trend    │  summary cards / best-fit line
///   └──────────┘   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod trend;
