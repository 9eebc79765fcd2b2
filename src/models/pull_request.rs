use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub state: PrState,
    pub user: PullRequestUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestUser {
    pub login: String,
}

/// Merged pull requests are reported as `closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrState::Open => write!(f, "open"),
            PrState::Closed => write!(f, "closed"),
        }
    }
}

/// A row of `pull_requests.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub state: PrState,
}

impl From<PullRequestSummary> for PullRequestRecord {
    fn from(pr: PullRequestSummary) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            author: pr.user.login,
            state: pr.state,
        }
    }
}
