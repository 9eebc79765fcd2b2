use indicatif::{ProgressBar, ProgressStyle};

use crate::audit::engine::AuditEngine;
use crate::audit::report::ReportWriter;
use crate::error::Result;
use crate::models::{AuditSummary, CategoryScores};

/// Scores for the audited pages, plus the pages skipped after a failure.
#[derive(Debug, Default)]
pub struct AuditRun {
    pub summary: AuditSummary,
    pub failed: Vec<(String, String)>,
}

/// Audits pages one at a time, saving each HTML report as it completes.
pub struct AuditRunner<E> {
    engine: E,
    reports: ReportWriter,
    keep_going: bool,
}

impl<E: AuditEngine> AuditRunner<E> {
    pub fn new(engine: E, reports: ReportWriter) -> Self {
        Self {
            engine,
            reports,
            keep_going: false,
        }
    }

    /// Log and skip pages whose audit fails instead of stopping the run.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub async fn audit_all(&mut self, urls: &[String]) -> Result<AuditRun> {
        tracing::info!("Starting Lighthouse audits...");
        let pb = ProgressBar::new(urls.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        let mut run = AuditRun::default();

        for url in urls {
            tracing::info!("Auditing: {}", url);
            match self.audit_one(url).await {
                Ok(scores) => run.summary.insert(url.as_str(), scores),
                Err(e) if self.keep_going => {
                    tracing::error!("Skipping {}: {}", url, e);
                    run.failed.push((url.clone(), e.to_string()));
                }
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }
            pb.inc(1);
        }

        pb.finish_with_message("Audits complete");
        Ok(run)
    }

    async fn audit_one(&mut self, url: &str) -> Result<CategoryScores> {
        let audit = self.engine.audit(url).await?;
        self.reports.write_report(url, &audit.report_html)?;
        Ok(audit.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::error::Error;
    use crate::models::{Category, CategoryScore, PageAudit};

    /// Scores every page 1.0 except those listed in `failing`.
    struct FakeEngine {
        failing: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeEngine {
        fn new(failing: Vec<&'static str>) -> Self {
            Self {
                failing,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AuditEngine for FakeEngine {
        async fn audit(&self, url: &str) -> Result<PageAudit> {
            self.calls.lock().unwrap().push(url.to_string());
            if self.failing.iter().any(|f| *f == url) {
                return Err(Error::audit(url, "chrome crashed"));
            }

            let categories = Category::ALL
                .iter()
                .map(|c| {
                    (
                        c.to_string(),
                        CategoryScore::new(c.as_str(), c.as_str(), Some(1.0)),
                    )
                })
                .collect();

            Ok(PageAudit {
                url: url.to_string(),
                report_html: format!("<html>{}</html>", url),
                categories,
            })
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_summary_keys_match_audited_urls() {
        let dir = tempfile::tempdir().unwrap();
        let pages = urls(&["http://localhost:8080/", "http://localhost:8080/about"]);
        let mut runner = AuditRunner::new(
            FakeEngine::new(vec![]),
            ReportWriter::new("http://localhost:8080", dir.path()),
        );

        let run = runner.audit_all(&pages).await.unwrap();

        let keys: Vec<_> = run.summary.urls().collect();
        assert_eq!(keys, vec!["http://localhost:8080/", "http://localhost:8080/about"]);
        assert!(run.failed.is_empty());

        let about = run.summary.get("http://localhost:8080/about").unwrap();
        assert!(about.contains_key("performance"));
        assert!(about.contains_key("accessibility"));
        assert!(about.contains_key("seo"));

        let report = dir.path().join("lighthouse-report-_about.html");
        assert_eq!(
            std::fs::read_to_string(report).unwrap(),
            "<html>http://localhost:8080/about</html>"
        );
    }

    #[tokio::test]
    async fn test_first_failure_halts_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let pages = urls(&[
            "http://localhost:8080/a",
            "http://localhost:8080/b",
            "http://localhost:8080/c",
        ]);
        let mut runner = AuditRunner::new(
            FakeEngine::new(vec!["http://localhost:8080/b"]),
            ReportWriter::new("http://localhost:8080", dir.path()),
        );

        let err = runner.audit_all(&pages).await.unwrap_err();
        assert!(matches!(err, Error::Audit { .. }));
        assert_eq!(
            *runner.engine.calls.lock().unwrap(),
            vec!["http://localhost:8080/a", "http://localhost:8080/b"]
        );
        assert!(dir.path().join("lighthouse-report-_a.html").exists());
        assert!(!dir.path().join("lighthouse-report-_c.html").exists());
    }

    #[tokio::test]
    async fn test_keep_going_skips_failed_pages() {
        let dir = tempfile::tempdir().unwrap();
        let pages = urls(&[
            "http://localhost:8080/a",
            "http://localhost:8080/b",
            "http://localhost:8080/c",
        ]);
        let mut runner = AuditRunner::new(
            FakeEngine::new(vec!["http://localhost:8080/b"]),
            ReportWriter::new("http://localhost:8080", dir.path()),
        )
        .keep_going(true);

        let run = runner.audit_all(&pages).await.unwrap();

        let keys: Vec<_> = run.summary.urls().collect();
        assert_eq!(keys, vec!["http://localhost:8080/a", "http://localhost:8080/c"]);
        assert_eq!(run.failed.len(), 1);
        assert_eq!(run.failed[0].0, "http://localhost:8080/b");
        assert!(run.failed[0].1.contains("chrome crashed"));
    }
}
