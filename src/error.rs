use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dashboard error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced by the data pipeline.
///
/// Only [`DashboardError::DataSource`] aborts the dashboard; the UI recovers
/// from [`DashboardError::DivisionUndefined`] by showing "N/A".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// The input file is missing, unreadable or does not match the schema.
    #[error("failed to load {}: {message}", .path.display())]
    DataSource { path: PathBuf, message: String },

    /// Year-over-year growth has a zero 2011 baseline.
    #[error("growth is undefined: the 2011 baseline sum is zero")]
    DivisionUndefined,
}

impl DashboardError {
    /// Wrap an `anyhow` chain from one of the format loaders.
    pub fn data_source(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        DashboardError::DataSource {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }
}
