use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::models::{Category, LighthouseResult, PageAudit};

/// Scores a single page and renders a human-readable report.
#[async_trait]
pub trait AuditEngine: Send + Sync {
    async fn audit(&self, url: &str) -> Result<PageAudit>;
}

/// Runs the `lighthouse` command line tool. Each call launches a fresh
/// headless Chrome that the tool tears down before exiting.
pub struct LighthouseCli {
    binary: PathBuf,
    chrome_path: Option<PathBuf>,
    categories: Vec<Category>,
}

impl LighthouseCli {
    pub fn new(binary: PathBuf, chrome_path: Option<PathBuf>) -> Self {
        Self {
            binary,
            chrome_path,
            categories: Category::ALL.to_vec(),
        }
    }

    fn args(&self, url: &str, output_base: &Path) -> Vec<String> {
        let only = self
            .categories
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(",");

        vec![
            url.to_string(),
            "--output=html".to_string(),
            "--output=json".to_string(),
            format!("--output-path={}", output_base.display()),
            format!("--only-categories={}", only),
            "--chrome-flags=--headless".to_string(),
        ]
    }
}

#[async_trait]
impl AuditEngine for LighthouseCli {
    async fn audit(&self, url: &str) -> Result<PageAudit> {
        let workdir = tempfile::tempdir()?;
        let output_base = workdir.path().join("page");

        let mut command = Command::new(&self.binary);
        command
            .args(self.args(url, &output_base))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(chrome) = &self.chrome_path {
            command.env("CHROME_PATH", chrome);
        }

        let output = command
            .output()
            .await
            .map_err(|e| Error::audit(url, format!("failed to launch {}: {}", self.binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_lines: Vec<_> = stderr.lines().rev().take(5).collect();
            return Err(Error::audit(
                url,
                format!(
                    "lighthouse exited with {}: {}",
                    output.status,
                    last_lines.into_iter().rev().collect::<Vec<_>>().join("\n")
                ),
            ));
        }

        // With several --output formats lighthouse appends `.report.<ext>`.
        let html_path = output_base.with_extension("report.html");
        let json_path = output_base.with_extension("report.json");

        let report_html = tokio::fs::read_to_string(&html_path)
            .await
            .map_err(|e| Error::audit(url, format!("missing HTML report: {}", e)))?;
        let json = tokio::fs::read_to_string(&json_path)
            .await
            .map_err(|e| Error::audit(url, format!("missing JSON report: {}", e)))?;

        let lhr: LighthouseResult = serde_json::from_str(&json)
            .map_err(|e| Error::audit(url, format!("unreadable JSON report: {}", e)))?;
        if let Some(runtime_error) = lhr.runtime_error {
            return Err(Error::audit(
                url,
                format!("{}: {}", runtime_error.code, runtime_error.message),
            ));
        }

        for category in &self.categories {
            if !lhr.categories.contains_key(category.as_str()) {
                return Err(Error::audit(url, format!("report has no {} category", category)));
            }
        }

        Ok(PageAudit {
            url: url.to_string(),
            report_html,
            categories: lhr.categories,
        })
    }
}
