use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The audit categories every page is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Performance,
    Accessibility,
    Seo,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Performance, Category::Accessibility, Category::Seo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::Seo => "seo",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category entry of the Lighthouse result (`lhr.categories.<id>`).
///
/// Fields other than the score are carried through untouched so the summary
/// holds the whole category object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub id: String,
    pub title: String,
    /// 0.0 to 1.0; `None` when the engine could not score the page.
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CategoryScore {
    pub fn new(id: &str, title: &str, score: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            score,
            extra: Map::new(),
        }
    }
}

/// Category id to score, in the order the engine reported them.
pub type CategoryScores = IndexMap<String, CategoryScore>;

/// Parsed Lighthouse result, reduced to what the summary needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LighthouseResult {
    pub categories: CategoryScores,
    #[serde(default)]
    pub runtime_error: Option<RuntimeError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeError {
    pub code: String,
    pub message: String,
}

/// What one audit produces: the rendered HTML report and the scores.
#[derive(Debug, Clone)]
pub struct PageAudit {
    pub url: String,
    pub report_html: String,
    pub categories: CategoryScores,
}

/// URL to category scores for every audited page, in audit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AuditSummary {
    pages: IndexMap<String, CategoryScores>,
}

impl AuditSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, scores: CategoryScores) {
        self.pages.insert(url.into(), scores);
    }

    pub fn get(&self, url: &str) -> Option<&CategoryScores> {
        self.pages.get(url)
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
