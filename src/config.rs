use std::path::PathBuf;

/// Environment variable naming the rental dataset.
pub const DATA_PATH_ENV: &str = "BIKE_DASHBOARD_DATA";

/// Dataset read when neither an argument nor the environment names one.
pub const DEFAULT_DATA_PATH: &str = "hour_analysis.csv";

pub const WINDOW_SIZE: [f32; 2] = [1280.0, 900.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Tabular file loaded at startup (`.csv`, `.parquet` or `.pq`).
    pub data_path: PathBuf,
}

impl DashboardConfig {
    /// Resolve the configuration from the process arguments and environment.
    ///
    /// Precedence: first positional argument, then `BIKE_DASHBOARD_DATA`
    /// (a `.env` file in the working directory is honoured), then
    /// `hour_analysis.csv`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(DATA_PATH_ENV).ok(),
        )
    }

    fn resolve(arg: Option<String>, env: Option<String>) -> Self {
        let data_path = arg
            .into_iter()
            .chain(env)
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

        Self {
            data_path: PathBuf::from(data_path),
        }
    }
}
