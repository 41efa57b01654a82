use std::path::PathBuf;

use thiserror::Error;

/// The backing file could not produce a usable dataset.
///
/// Fatal at startup; after that a failed reload keeps the last good data.
#[derive(Error, Debug)]
pub enum DataUnavailable {
    #[error("dataset file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("unsupported dataset format: .{0}")]
    Unsupported(String),

    #[error("malformed dataset {}: {cause:#}", path.display())]
    Malformed { path: PathBuf, cause: anyhow::Error },
}
