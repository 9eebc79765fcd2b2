pub mod browser;
pub mod crawler;
pub mod engine;
pub mod report;
pub mod runner;

pub use browser::{HeadlessChrome, PageRenderer};
pub use crawler::LinkCrawler;
pub use engine::{AuditEngine, LighthouseCli};
pub use report::{ReportWriter, SummaryWriter};
pub use runner::{AuditRun, AuditRunner};

use crate::error::Result;

/// Crawl once, audit every discovered page in turn, then write the summary.
pub struct SiteAudit<R, E> {
    base_url: String,
    crawler: LinkCrawler<R>,
    runner: AuditRunner<E>,
    summary: SummaryWriter,
}

impl<R: PageRenderer, E: AuditEngine> SiteAudit<R, E> {
    pub fn new(
        base_url: &str,
        crawler: LinkCrawler<R>,
        runner: AuditRunner<E>,
        summary: SummaryWriter,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            crawler,
            runner,
            summary,
        }
    }

    pub async fn run(&mut self) -> Result<AuditRun> {
        let pages = self.crawler.discover(&self.base_url).await?;
        if pages.is_empty() {
            tracing::warn!("No pages under {} were linked from the entry page", self.base_url);
        }

        let run = self.runner.audit_all(&pages).await?;
        self.summary.write_summary(&run.summary)?;

        if !run.failed.is_empty() {
            tracing::warn!("{} page(s) could not be audited", run.failed.len());
        }
        Ok(run)
    }
}
