use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO_OWNER: &str = "preactjs";
pub const DEFAULT_REPO_NAME: &str = "preact-www";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Settings for the repository history export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub github_token: String,
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub output_dir: PathBuf,
}

impl ExportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let github_token = lookup("GITHUB_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        let api_url = lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let owner = lookup("GITHUB_REPO_OWNER").unwrap_or_else(|| DEFAULT_REPO_OWNER.to_string());
        let repo = lookup("GITHUB_REPO_NAME").unwrap_or_else(|| DEFAULT_REPO_NAME.to_string());
        let output_dir = lookup("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            github_token,
            api_url,
            owner,
            repo,
            output_dir,
        })
    }
}

/// Settings for the site crawl and audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub chrome_path: Option<PathBuf>,
    pub lighthouse_path: Option<PathBuf>,
    pub navigation_timeout: Duration,
    pub keep_going: bool,
}

impl AuditConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("AUDIT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)?;

        let output_dir = lookup("AUDIT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let chrome_path = lookup("CHROME_PATH").map(PathBuf::from);
        let lighthouse_path = lookup("LIGHTHOUSE_PATH").map(PathBuf::from);

        let navigation_timeout = match lookup("AUDIT_NAVIGATION_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse().map_err(|_| {
                Error::Config(format!("AUDIT_NAVIGATION_TIMEOUT_SECS is not a number: {}", v))
            })?),
            None => Duration::from_secs(30),
        };

        let keep_going = lookup("AUDIT_KEEP_GOING")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            base_url,
            output_dir,
            chrome_path,
            lighthouse_path,
            navigation_timeout,
            keep_going,
        })
    }
}
