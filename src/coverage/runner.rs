use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::{Child, Command};

use super::error::{AnalyzeError, Result};

/// File name of the collection definition inside the analyzed root
pub const COLLECTION_FILE: &str = "collection.json";

/// Produces a collection-run report and returns where it was written
pub trait ReportProducer {
    fn produce(&self) -> Result<PathBuf>;
}

/// Uses a report that already exists on disk
#[derive(Debug, Clone)]
pub struct ExistingReport {
    pub path: PathBuf,
}

impl ExistingReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportProducer for ExistingReport {
    fn produce(&self) -> Result<PathBuf> {
        tracing::info!("Skipping collection run, reading {}", self.path.display());
        Ok(self.path.clone())
    }
}

/// Runs a Newman-compatible collection runner as a subprocess:
/// `<program> run <collection> --reporters json --reporter-json-export <report>`
#[derive(Debug, Clone)]
pub struct NewmanRunner {
    pub program: String,
    pub collection: PathBuf,
    pub report_path: PathBuf,
    pub timeout: Duration,
}

impl NewmanRunner {
    /// Runner for the collection at `<root>/collection.json`
    pub fn for_root(
        program: impl Into<String>,
        root: &Path,
        report_path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            collection: root.join(COLLECTION_FILE),
            report_path: report_path.into(),
            timeout,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("run")
            .arg(&self.collection)
            .args(["--reporters", "json", "--reporter-json-export"])
            .arg(&self.report_path)
            .kill_on_drop(true);
        cmd
    }

    /// A report left over from an earlier run must not be mistaken for this one
    fn remove_stale_report(&self) -> Result<()> {
        match fs::remove_file(&self.report_path) {
            Ok(()) => {
                tracing::debug!("Removed previous report {}", self.report_path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AnalyzeError::Subprocess(format!(
                "could not remove previous report {}: {}",
                self.report_path.display(),
                e
            ))),
        }
    }

    async fn run(&self) -> Result<ExitStatus> {
        let mut child = self.command().spawn().map_err(|e| {
            AnalyzeError::Subprocess(format!("could not start {}: {}", self.program, e))
        })?;

        tracing::debug!(
            program = %self.program,
            timeout_secs = %self.timeout.as_secs(),
            "Waiting for collection runner"
        );

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => status.map_err(|e| {
                AnalyzeError::Subprocess(format!("error waiting for {}: {}", self.program, e))
            }),
            Err(_) => {
                self.kill(&mut child).await;
                Err(AnalyzeError::Subprocess(format!(
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                )))
            }
        }
    }

    /// Kill and reap a runner that outlived its timeout
    async fn kill(&self, child: &mut Child) {
        if let Err(e) = child.start_kill() {
            tracing::warn!("Failed to kill {}: {}", self.program, e);
        }
        if let Err(e) = child.wait().await {
            tracing::warn!("Failed to reap {}: {}", self.program, e);
        }
    }
}

impl ReportProducer for NewmanRunner {
    fn produce(&self) -> Result<PathBuf> {
        tracing::info!(
            "Running {} against {}",
            self.program,
            self.collection.display()
        );

        self.remove_stale_report()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AnalyzeError::Subprocess(format!("could not start runtime: {}", e)))?;

        let status = runtime.block_on(self.run())?;
        if !status.success() {
            return Err(AnalyzeError::Subprocess(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        if !self.report_path.is_file() {
            return Err(AnalyzeError::Subprocess(format!(
                "{} did not write a report to {}",
                self.program,
                self.report_path.display()
            )));
        }

        tracing::info!("Run report written to {}", self.report_path.display());
        Ok(self.report_path.clone())
    }
}
