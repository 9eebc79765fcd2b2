use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// A row of `commits.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub sha: String,
    pub author: String,
    pub date: String,
    pub message: String,
}

impl From<CommitSummary> for CommitRecord {
    fn from(summary: CommitSummary) -> Self {
        Self {
            sha: summary.sha,
            author: summary.commit.author.name,
            date: summary
                .commit
                .author
                .date
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            message: summary.commit.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_commit_keeps_api_date_text() {
        let raw = serde_json::json!({
            "sha": "a1",
            "node_id": "C_kwDO",
            "commit": {
                "author": {"name": "Jane", "email": "jane@example.com", "date": "2024-01-01T00:00:00Z"},
                "committer": {"name": "GitHub", "email": "noreply@github.com", "date": "2024-01-01T00:00:00Z"},
                "message": "init\n\nlonger body"
            },
            "author": null
        });

        let summary: CommitSummary = serde_json::from_value(raw).unwrap();
        let record = CommitRecord::from(summary);

        assert_eq!(record.sha, "a1");
        assert_eq!(record.author, "Jane");
        assert_eq!(record.date, "2024-01-01T00:00:00Z");
        assert_eq!(record.message, "init\n\nlonger body");
    }
}
