pub mod sink;
pub mod commits;
pub mod pull_requests;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::Result;

pub use sink::{CsvRow, CsvSink};
pub use commits::CommitExporter;
pub use pull_requests::PullRequestExporter;

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub records: usize,
    pub path: PathBuf,
}

/// Fetches one listing from the API and writes it to a CSV file.
///
/// Records are projected in memory before anything is written, so a failed
/// run never leaves a partial file behind.
#[async_trait]
pub trait Exporter: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> Result<ExportOutcome>;
}

/// Run every exporter in order. A failing exporter is logged and does not
/// prevent the remaining ones from running.
pub async fn run_all(exporters: &[Box<dyn Exporter>]) -> Vec<Result<ExportOutcome>> {
    let mut outcomes = Vec::with_capacity(exporters.len());

    for exporter in exporters {
        tracing::info!("Fetching {} history...", exporter.name());
        let outcome = exporter.run().await;
        match &outcome {
            Ok(done) => {
                tracing::info!("Saved {} {} to {}", done.records, exporter.name(), done.path.display());
            }
            Err(e) => {
                tracing::error!("Error fetching {}: {}", exporter.name(), e);
            }
        }
        outcomes.push(outcome);
    }

    outcomes
}
