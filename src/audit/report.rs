use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::AuditSummary;

pub const REPORT_PREFIX: &str = "lighthouse-report-";
pub const SUMMARY_FILE: &str = "lighthouse-summary.json";

/// File name stem for a page: the part of `url` after `base_url`, with `/`
/// replaced by `_`.
pub fn report_slug(url: &str, base_url: &str) -> String {
    url.strip_prefix(base_url).unwrap_or(url).replace('/', "_")
}

pub fn report_file_name(url: &str, base_url: &str) -> String {
    format!("{}{}.html", REPORT_PREFIX, report_slug(url, base_url))
}

/// Writes one HTML report per audited page.
pub struct ReportWriter {
    base_url: String,
    output_dir: PathBuf,
    written: HashMap<PathBuf, String>,
}

impl ReportWriter {
    pub fn new(base_url: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.to_string(),
            output_dir: output_dir.into(),
            written: HashMap::new(),
        }
    }

    /// Write `html` for `url`, replacing any existing file of the same name.
    pub fn write_report(&mut self, url: &str, html: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(report_file_name(url, &self.base_url));

        if let Some(previous) = self.written.get(&path) {
            if previous != url {
                tracing::warn!(
                    "Report for {} overwrites the report for {} ({})",
                    url,
                    previous,
                    path.display()
                );
            }
        }

        std::fs::write(&path, html)?;
        self.written.insert(path.clone(), url.to_string());
        tracing::info!("Report saved: {}", path.display());
        Ok(path)
    }
}

/// Writes the URL to scores mapping as one pretty-printed JSON document.
pub struct SummaryWriter {
    path: PathBuf,
}

impl SummaryWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            path: output_dir.as_ref().join(SUMMARY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_summary(&self, summary: &AuditSummary) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(&self.path, json)?;
        tracing::info!("Summary saved: {}", self.path.display());
        Ok(self.path.clone())
    }
}
