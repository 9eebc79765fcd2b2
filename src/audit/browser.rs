use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use url::Url;

use crate::error::{Error, Result};

/// Loads a page and returns its DOM after scripts have run.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &Url) -> Result<String>;
}

/// Renders pages with a headless Chrome process per call.
pub struct HeadlessChrome {
    binary: PathBuf,
    timeout: Duration,
    http: reqwest::Client,
}

impl HeadlessChrome {
    pub fn new(binary: PathBuf, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            binary,
            timeout,
            http,
        })
    }

    /// Chrome renders its own error page for an unreachable host and exits
    /// cleanly, so reachability is checked up front.
    async fn probe(&self, url: &Url) -> Result<()> {
        self.http
            .get(url.as_str())
            .send()
            .await
            .map(|_| ())
            .map_err(|e| Error::Navigation(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl PageRenderer for HeadlessChrome {
    async fn render(&self, url: &Url) -> Result<String> {
        self.probe(url).await?;

        tracing::debug!("Rendering {} with {}", url, self.binary.display());
        let child = Command::new(&self.binary)
            .args([
                "--headless",
                "--disable-gpu",
                "--no-first-run",
                "--dump-dom",
                url.as_str(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Navigation(format!("failed to launch {}: {}", self.binary.display(), e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                Error::Navigation(format!("{} did not load within {:?}", url, self.timeout))
            })??;

        if !output.status.success() {
            return Err(Error::Navigation(format!(
                "{}: browser exited with {}: {}",
                url,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
