//! Endpoint coverage analysis.
//!
//! Cross-checks the HTTP handlers declared in source (via `@Method:` / `@Route:`
//! doc-comment annotations) against the requests a collection runner actually
//! executed, and renders the result as a table.
//!
//! Each stage consumes the previous stage's output and returns a fresh value:
//! [`scanner::scan_directory`] → [`report::parse_report`] →
//! [`reconcile::reconcile`] → [`render`].

pub mod error;
pub mod reconcile;
pub mod render;
pub mod report;
pub mod runner;
pub mod scanner;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use error::{AnalyzeError, Result};
pub use reconcile::reconcile;
pub use render::{render_json, render_table};
pub use report::{parse_report, parse_report_str};
pub use runner::{ExistingReport, NewmanRunner, ReportProducer};
pub use scanner::{scan_directory, scan_files};

/// A route the service source claims to implement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredEndpoint {
    pub method: String,
    pub path: String,
    /// File the winning declaration was found in
    pub file: PathBuf,
}

/// A route invoked during a collection run, keyed by its reconstructed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedExecution {
    pub method: String,
    pub path: String,
    pub status_code: u16,
}

/// Declared endpoints keyed by path
pub type DeclaredEndpoints = BTreeMap<String, DeclaredEndpoint>;

/// Observed executions keyed by path, last execution wins
pub type ObservedExecutions = BTreeMap<String, ObservedExecution>;

/// Outcome of reconciling one declared endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoverageResult {
    Success,
    Failure,
    #[serde(rename = "Not Covered")]
    NotCovered,
}

impl CoverageResult {
    pub fn as_str(self) -> &'static str {
        match self {
            CoverageResult::Success => "Success",
            CoverageResult::Failure => "Failure",
            CoverageResult::NotCovered => "Not Covered",
        }
    }
}

impl std::fmt::Display for CoverageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the final coverage table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledEndpoint {
    pub method: String,
    pub path: String,
    pub result: CoverageResult,
    /// Report the result came from, empty when not covered
    pub source: String,
}

/// Run a full analysis: produce the report, scan `root`, parse, reconcile.
///
/// Stages run strictly in sequence; the first fatal error aborts the run and
/// no partial result is returned.
pub fn run_analysis(root: &Path, producer: &dyn ReportProducer) -> Result<Vec<ReconciledEndpoint>> {
    let report_path = producer.produce()?;
    tracing::info!("Using run report: {}", report_path.display());

    let declared = scan_directory(root)?;
    tracing::info!("Found {} declared endpoints under {}", declared.len(), root.display());

    let observed = parse_report(&report_path)?;
    tracing::info!("Found {} observed endpoints in report", observed.len());

    let source = report_path.display().to_string();
    Ok(reconcile(&declared, &observed, &source))
}
