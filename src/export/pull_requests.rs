use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::export::{CsvSink, ExportOutcome, Exporter};
use crate::github::GitHubClient;
use crate::models::{PullRequestRecord, PullRequestSummary};

pub const PULL_REQUESTS_FILE: &str = "pull_requests.csv";

pub struct PullRequestExporter {
    github: Arc<GitHubClient>,
    owner: String,
    repo: String,
    sink: CsvSink,
}

impl PullRequestExporter {
    pub fn new(github: Arc<GitHubClient>, owner: &str, repo: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            github,
            owner: owner.to_string(),
            repo: repo.to_string(),
            sink: CsvSink::new(output_dir.into().join(PULL_REQUESTS_FILE)),
        }
    }

    pub async fn fetch(&self) -> Result<Vec<PullRequestRecord>> {
        let path = format!("/repos/{}/{}/pulls", self.owner, self.repo);
        // "all" covers open, closed and merged pull requests
        let pulls: Vec<PullRequestSummary> = self.github.get(&path, &[("state", "all")]).await?;
        tracing::info!("Fetched {} pull requests.", pulls.len());
        Ok(pulls.into_iter().map(PullRequestRecord::from).collect())
    }
}

#[async_trait]
impl Exporter for PullRequestExporter {
    fn name(&self) -> &str {
        "pull requests"
    }

    async fn run(&self) -> Result<ExportOutcome> {
        let records = self.fetch().await?;
        let written = self.sink.write_records(&records)?;
        Ok(ExportOutcome {
            records: written,
            path: self.sink.path().to_path_buf(),
        })
    }
}
