use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use repoaudit::audit::{HeadlessChrome, LighthouseCli, ReportWriter, SummaryWriter};
use repoaudit::tools::{locate_binary, CHROME_CANDIDATES, LIGHTHOUSE_CANDIDATES};
use repoaudit::{
    AuditConfig, AuditRunner, CommitExporter, ExportConfig, Exporter, GitHubClient, LinkCrawler,
    PullRequestExporter, SiteAudit,
};

#[derive(Parser, Debug)]
#[command(name = "repoaudit")]
#[command(version)]
#[command(about = "Export repository history and audit a locally served site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export commits and pull requests to commits.csv and pull_requests.csv
    Export {
        /// Repository owner
        #[arg(long, env = "GITHUB_REPO_OWNER")]
        owner: Option<String>,

        /// Repository name
        #[arg(long, env = "GITHUB_REPO_NAME")]
        repo: Option<String>,

        /// Directory the CSV files are written to
        #[arg(short, long, env = "EXPORT_DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Crawl the site and run a Lighthouse audit on every linked page
    Audit {
        /// Entry page of the site; only links starting with it are audited
        #[arg(long, env = "AUDIT_BASE_URL")]
        base_url: Option<String>,

        /// Directory for the HTML reports and the JSON summary
        #[arg(short, long, env = "AUDIT_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Skip pages whose audit fails instead of stopping
        #[arg(long)]
        keep_going: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("repoaudit=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            owner,
            repo,
            output_dir,
        } => {
            let mut config = ExportConfig::from_env()?;
            if let Some(owner) = owner {
                config.owner = owner;
            }
            if let Some(repo) = repo {
                config.repo = repo;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            export(config).await
        }
        Commands::Audit {
            base_url,
            output_dir,
            keep_going,
        } => {
            let mut config = AuditConfig::from_env()?;
            if let Some(base_url) = base_url {
                url::Url::parse(&base_url)?;
                config.base_url = base_url;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            config.keep_going |= keep_going;
            audit(config).await
        }
    }
}

async fn export(config: ExportConfig) -> anyhow::Result<()> {
    tracing::info!("Exporting history of {}/{}", config.owner, config.repo);
    let github = Arc::new(GitHubClient::new(&config.api_url, &config.github_token)?);

    let exporters: Vec<Box<dyn Exporter>> = vec![
        Box::new(CommitExporter::new(
            github.clone(),
            &config.owner,
            &config.repo,
            &config.output_dir,
        )),
        Box::new(PullRequestExporter::new(
            github,
            &config.owner,
            &config.repo,
            &config.output_dir,
        )),
    ];

    repoaudit::export::run_all(&exporters).await;
    Ok(())
}

async fn audit(config: AuditConfig) -> anyhow::Result<()> {
    let chrome = locate_binary(config.chrome_path.as_deref(), CHROME_CANDIDATES)?;
    let lighthouse = locate_binary(config.lighthouse_path.as_deref(), LIGHTHOUSE_CANDIDATES)?;
    tracing::debug!("Using {} and {}", chrome.display(), lighthouse.display());

    std::fs::create_dir_all(&config.output_dir)?;

    let crawler = LinkCrawler::new(HeadlessChrome::new(chrome.clone(), config.navigation_timeout)?);
    let runner = AuditRunner::new(
        LighthouseCli::new(lighthouse, Some(chrome)),
        ReportWriter::new(&config.base_url, &config.output_dir),
    )
    .keep_going(config.keep_going);

    let mut site_audit = SiteAudit::new(
        &config.base_url,
        crawler,
        runner,
        SummaryWriter::new(&config.output_dir),
    );

    let run = site_audit.run().await?;
    for (url, reason) in &run.failed {
        tracing::warn!("Not audited: {} ({})", url, reason);
    }
    Ok(())
}
