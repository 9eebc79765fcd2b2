use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::audit::browser::PageRenderer;
use crate::error::Result;

lazy_static! {
    static ref ANCHORS: Selector = Selector::parse("a[href]").unwrap();
}

const NON_NAVIGATIONAL: &[&str] = &["javascript", "mailto", "tel", "data"];

/// Discovers the pages linked from a site's entry page.
pub struct LinkCrawler<R> {
    renderer: R,
}

impl<R: PageRenderer> LinkCrawler<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Load `base_url` once and return every distinct linked URL that starts
    /// with `base_url`, in order of first appearance.
    pub async fn discover(&self, base_url: &str) -> Result<Vec<String>> {
        let page_url = Url::parse(base_url)?;
        tracing::info!("Crawling {}...", base_url);

        let dom = self.renderer.render(&page_url).await?;
        let links = extract_links(&dom, &page_url);
        tracing::debug!("Found {} links on {}", links.len(), base_url);

        let pages = filter_same_origin(links, base_url);
        tracing::info!("Discovered {} page(s): {:?}", pages.len(), pages);
        Ok(pages)
    }
}

/// Absolute targets of every `a[href]` element in `html`, resolved against
/// `page_url` the way the DOM resolves `a.href`.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHORS)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| page_url.join(href.trim()).ok())
        .filter(|url| !NON_NAVIGATIONAL.iter().any(|s| *s == url.scheme()))
        .map(String::from)
        .collect()
}

/// Drop exact duplicates, then keep only URLs that begin with `base_url`.
pub fn filter_same_origin(links: Vec<String>, base_url: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .filter(|link| link.starts_with(base_url))
        .collect()
}
