use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::export::{CsvSink, ExportOutcome, Exporter};
use crate::github::GitHubClient;
use crate::models::{CommitRecord, CommitSummary};

pub const COMMITS_FILE: &str = "commits.csv";

pub struct CommitExporter {
    github: Arc<GitHubClient>,
    owner: String,
    repo: String,
    sink: CsvSink,
}

impl CommitExporter {
    pub fn new(github: Arc<GitHubClient>, owner: &str, repo: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            github,
            owner: owner.to_string(),
            repo: repo.to_string(),
            sink: CsvSink::new(output_dir.into().join(COMMITS_FILE)),
        }
    }

    pub async fn fetch(&self) -> Result<Vec<CommitRecord>> {
        let path = format!("/repos/{}/{}/commits", self.owner, self.repo);
        let commits: Vec<CommitSummary> = self.github.get(&path, &[]).await?;
        tracing::info!("Fetched {} commits.", commits.len());
        Ok(commits.into_iter().map(CommitRecord::from).collect())
    }
}

#[async_trait]
impl Exporter for CommitExporter {
    fn name(&self) -> &str {
        "commits"
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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn commit(sha: &str, name: &str, date: &str, message: &str) -> serde_json::Value {
        serde_json::json!({
            "sha": sha,
            "commit": {
                "author": {"name": name, "email": "jane@example.com", "date": date},
                "message": message
            }
        })
    }

    #[tokio::test]
    async fn test_exports_commits_in_api_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/preactjs/preact-www/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                commit("a1", "Jane", "2024-01-01T00:00:00Z", "init"),
                commit("b2", "Jane", "2024-01-02T00:00:00Z", "fix"),
            ])))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let github = Arc::new(GitHubClient::new(&server.uri(), "token").unwrap());
        let exporter = CommitExporter::new(github, "preactjs", "preact-www", dir.path());

        let outcome = exporter.run().await.unwrap();
        assert_eq!(outcome.records, 2);
        assert_eq!(outcome.path, dir.path().join("commits.csv"));

        let text = std::fs::read_to_string(&outcome.path).unwrap();
        assert_eq!(
            text,
            "SHA,Author,Date,Message\n\
             a1,Jane,2024-01-01T00:00:00Z,init\n\
             b2,Jane,2024-01-02T00:00:00Z,fix\n"
        );
    }

    #[tokio::test]
    async fn test_repeat_run_is_byte_identical() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                commit("c3", "Sam", "2024-03-04T05:06:07Z", "multi\nline, with comma"),
            ])))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let github = Arc::new(GitHubClient::new(&server.uri(), "token").unwrap());
        let exporter = CommitExporter::new(github, "o", "r", dir.path());

        let first = exporter.run().await.unwrap();
        let first_bytes = std::fs::read(&first.path).unwrap();
        let second = exporter.run().await.unwrap();
        let second_bytes = std::fs::read(&second.path).unwrap();

        assert_eq!(first_bytes, second_bytes);
    }

    #[tokio::test]
    async fn test_failed_request_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"Not Found\"}"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let github = Arc::new(GitHubClient::new(&server.uri(), "token").unwrap());
        let exporter = CommitExporter::new(github, "o", "missing", dir.path());

        let err = exporter.run().await.unwrap_err();
        assert!(err.is_request_error());
        assert!(!dir.path().join("commits.csv").exists());
    }
}
