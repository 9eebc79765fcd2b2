pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod export;
pub mod audit;
pub mod tools;

pub use config::{AuditConfig, ExportConfig};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use export::{CommitExporter, Exporter, PullRequestExporter};
pub use audit::{AuditRunner, LinkCrawler, SiteAudit};
