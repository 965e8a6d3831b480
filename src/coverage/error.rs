use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Root directory to scan is missing or not a directory
    #[error("Cannot scan {path}: {reason}")]
    ScanRoot { path: PathBuf, reason: String },

    /// A single source file could not be read or parsed; the scan skips it
    #[error("Skipping {path}: {reason}")]
    FileScan { path: PathBuf, reason: String },

    /// The collection runner could not be started, failed, or timed out
    #[error("Collection runner failed: {0}")]
    Subprocess(String),

    #[error("Error reading run report {path}: {source}")]
    ReportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing run report JSON: {0}")]
    ReportFormat(#[from] serde_json::Error),
}
