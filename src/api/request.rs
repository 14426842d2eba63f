/// Request bodies for the Tavily endpoints.
///
/// Optional parameters are `Option`s skipped during serialization, so the
/// server applies its own defaults instead of receiving `null`.
use clap::ValueEnum;
use serde::{Serialize, Serializer};

/// Search/extraction thoroughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    /// Cheaper and faster (1 credit for search).
    #[default]
    Basic,
    /// More thorough (2 credits for search).
    Advanced,
}

/// Search domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    #[default]
    General,
    News,
    Finance,
}

/// Recency filter. Short and long spellings are both accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
    D,
    W,
    M,
    Y,
}

/// Format of extracted page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Markdown,
    Text,
}

/// Value of a flag that is either a named mode or a plain "on".
///
/// `include_answer` and `include_raw_content` accept both a mode string
/// (`"basic"`, `"markdown"`, ...) and the boolean `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeFlag {
    /// Sent as the string itself.
    Named(String),
    /// Sent as JSON `true`.
    Enabled,
}

impl ModeFlag {
    /// Interpret a flag value: `true`/`True` become [`ModeFlag::Enabled`].
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "true" | "True" => Self::Enabled,
            other => Self::Named(other.to_owned()),
        }
    }
}

impl Serialize for ModeFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(mode) => serializer.serialize_str(mode),
            Self::Enabled => serializer.serialize_bool(true),
        }
    }
}

/// Split a comma-separated option into trimmed, non-empty items.
///
/// Returns `None` ("no filter") for absent input or input with no items.
#[must_use]
pub fn parse_list(value: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = value?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: Depth,
    pub topic: Topic,
    pub max_results: u8,
    pub include_images: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_answer: Option<ModeFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_raw_content: Option<ModeFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Body of `POST /extract`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    pub extract_depth: Depth,
    pub format: ContentFormat,
    pub include_images: bool,
    /// Server-side timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

/// Link-following limits and filters shared by crawl and map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlScope {
    pub url: String,
    pub max_depth: u8,
    pub max_breadth: u32,
    pub limit: u32,
    pub allow_external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

/// Body of `POST /crawl`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlRequest {
    #[serde(flatten)]
    pub scope: CrawlScope,
    pub extract_depth: Depth,
    pub include_images: bool,
}

/// Body of `POST /map`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRequest {
    #[serde(flatten)]
    pub scope: CrawlScope,
}
