/// Response rendering: JSON value trees to json, text, or markdown.
///
/// Responses are untrusted external data. Every field lookup has a
/// default, `null` counts as missing, and unknown keys are ignored.
use serde_json::{Map, Value};

use super::args::OutputFormat;
use super::style::{Role, Styler};

const SEARCH_PREVIEW_CHARS: usize = 200;
const EXTRACT_PREVIEW_CHARS: usize = 2000;
const CRAWL_PREVIEW_CHARS_TEXT: usize = 300;
const CRAWL_PREVIEW_CHARS_MARKDOWN: usize = 500;
const RULE_WIDTH: usize = 60;

/// Which template to render a response with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Search,
    Extract,
    Crawl,
    Map,
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    Text,
    Markdown,
}

/// Render `response` in `format`.
///
/// `styler` only affects text output; markdown is never colored.
///
/// # Errors
///
/// Returns `serde_json::Error` if json serialization fails.
pub fn render(
    kind: ResponseKind,
    response: &Value,
    format: OutputFormat,
    styler: Styler,
) -> Result<String, serde_json::Error> {
    let (markup, styler) = match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(response)?;
            out.push('\n');
            return Ok(out);
        }
        OutputFormat::Text => (Markup::Text, styler),
        OutputFormat::Markdown => (Markup::Markdown, Styler::plain()),
    };

    let mut page = Page::new(markup, styler);
    match kind {
        ResponseKind::Search => search(response, &mut page),
        ResponseKind::Extract => extract(response, &mut page),
        ResponseKind::Crawl => crawl(response, &mut page),
        ResponseKind::Map => map(response, &mut page),
        ResponseKind::Usage => usage(response, &mut page),
    }
    Ok(page.finish())
}

/// Cut `content` to at most `limit` chars.
///
/// Returns the visible prefix and, if anything was cut, how many chars were
/// omitted.
#[must_use]
pub fn truncate(content: &str, limit: usize) -> (&str, Option<usize>) {
    match content.char_indices().nth(limit) {
        Some((idx, _)) => (&content[..idx], Some(content[idx..].chars().count())),
        None => (content, None),
    }
}

/// Generic printer for mappings without a dedicated template.
///
/// Keys become labels; nested mappings indent by two spaces; sequences list
/// scalars as bullets and mappings recursively, each followed by a blank line.
#[must_use]
pub fn render_tree(map: &Map<String, Value>, indent: usize, styler: Styler) -> String {
    let mut page = Page::new(Markup::Text, styler);
    tree(map, indent, &mut page);
    page.finish()
}

fn tree(map: &Map<String, Value>, indent: usize, page: &mut Page) {
    let prefix = "  ".repeat(indent);
    for (key, value) in map {
        let label = page.paint(&format!("{key}:"), Role::Label);
        match value {
            Value::Object(inner) => {
                page.line(format!("{prefix}{label}"));
                tree(inner, indent + 1, page);
            }
            Value::Array(items) => {
                page.line(format!("{prefix}{label}"));
                for item in items {
                    if let Value::Object(inner) = item {
                        tree(inner, indent + 1, page);
                        page.blank();
                    } else {
                        page.line(format!("{prefix}  - {}", scalar(item)));
                    }
                }
            }
            other => page.line(format!("{prefix}{label} {}", scalar(other))),
        }
    }
}

// --- Templates ---

fn search(resp: &Value, page: &mut Page) {
    let query = text_or(resp, "query", "");
    page.title(&format!("Search: {query}"));

    if let Some(answer) = field(resp, "answer")
        .and_then(Value::as_str)
        .filter(|a| !a.is_empty())
    {
        match page.markup {
            Markup::Markdown => {
                page.line("## Answer");
                page.blank();
            }
            Markup::Text => {
                let header = page.paint("Answer:", Role::Answer);
                page.line(header);
            }
        }
        page.line(answer);
        page.blank();
    }

    let results = items(resp, "results");
    page.section(&format!("Results ({})", results.len()));

    for (i, result) in results.iter().enumerate() {
        let n = i + 1;
        let title = text_or(result, "title", "No title");
        let url = text_or(result, "url", "");
        let content = text_or(result, "content", "");
        let score = number(result, "score").unwrap_or(0.0);

        match page.markup {
            Markup::Markdown => {
                page.line(format!("### {n}. [{title}]({url})"));
                page.line(format!("*Score: {score:.2}*"));
                page.blank();
                page.line(&content);
                page.blank();
            }
            Markup::Text => {
                let heading = page.paint(&format!("{n}. {title}"), Role::Item);
                let link = page.paint(&format!("   {url}"), Role::Link);
                page.line(heading);
                page.line(link);
                page.line(format!("   Score: {score:.2}"));
                let (preview, omitted) = truncate(&content, SEARCH_PREVIEW_CHARS);
                page.line(format!("   {preview}{}", ellipsis(omitted)));
                page.blank();
            }
        }
    }

    let images = items(resp, "images");
    if !images.is_empty() {
        match page.markup {
            Markup::Markdown => {
                page.line(format!("## Images ({})", images.len()));
                page.blank();
                for img in images {
                    if img.is_object() {
                        page.line(format!(
                            "- ![{}]({})",
                            text_or(img, "description", ""),
                            text_or(img, "url", "")
                        ));
                    } else {
                        page.line(format!("- {}", scalar(img)));
                    }
                }
            }
            Markup::Text => {
                let header = page.paint(&format!("Images ({}):", images.len()), Role::Section);
                page.line(header);
                for img in images {
                    if img.is_object() {
                        page.line(format!(
                            "  - {} - {}",
                            text_or(img, "url", ""),
                            text_or(img, "description", "")
                        ));
                    } else {
                        page.line(format!("  - {}", scalar(img)));
                    }
                }
            }
        }
    }

    page.response_time(resp);
}

fn extract(resp: &Value, page: &mut Page) {
    page.title("Extracted Content");

    let results = items(resp, "results");
    page.section(&format!("Results ({})", results.len()));

    for (i, result) in results.iter().enumerate() {
        let n = i + 1;
        let url = text_or(result, "url", "");
        let content = text_or(result, "raw_content", "");

        match page.markup {
            Markup::Markdown => {
                page.line(format!("### {n}. {url}"));
                page.blank();
                page.line(&content);
                page.blank();
                page.line("---");
                page.blank();
            }
            Markup::Text => {
                let heading = page.paint(&format!("{n}. {url}"), Role::Item);
                page.line(heading);
                page.blank();
                let (visible, omitted) = truncate(&content, EXTRACT_PREVIEW_CHARS);
                page.line(visible);
                if let Some(more) = omitted {
                    page.blank();
                    page.line(format!("... ({more} more characters)"));
                }
                page.blank();
                page.line("-".repeat(RULE_WIDTH));
                page.blank();
            }
        }
    }

    let failed = items(resp, "failed_results");
    if !failed.is_empty() {
        let bullet = match page.markup {
            Markup::Markdown => {
                page.line("## Failed URLs");
                page.blank();
                "-"
            }
            Markup::Text => {
                let header = page.paint("Failed URLs:", Role::Failure);
                page.line(header);
                "  -"
            }
        };
        for f in failed {
            page.line(format!(
                "{bullet} {}: {}",
                text_or(f, "url", ""),
                text_or(f, "error", "Unknown error")
            ));
        }
    }

    page.response_time(resp);
}

fn crawl(resp: &Value, page: &mut Page) {
    let base_url = text_or(resp, "base_url", "");
    page.title(&format!("Crawl Results: {base_url}"));

    let results = items(resp, "results");
    page.section(&format!("Pages Crawled ({})", results.len()));

    for (i, result) in results.iter().enumerate() {
        let n = i + 1;
        let url = text_or(result, "url", "");
        let content = text_or(result, "raw_content", "");

        match page.markup {
            Markup::Markdown => {
                page.line(format!("### {n}. {url}"));
                page.blank();
                let (preview, omitted) = truncate(&content, CRAWL_PREVIEW_CHARS_MARKDOWN);
                page.line(format!("{preview}{}", ellipsis(omitted)));
                page.blank();
            }
            Markup::Text => {
                let heading = page.paint(&format!("{n}. {url}"), Role::Item);
                page.line(heading);
                let (preview, omitted) = truncate(&content, CRAWL_PREVIEW_CHARS_TEXT);
                page.line(format!("   {preview}{}", ellipsis(omitted)));
                page.blank();
            }
        }
    }

    page.response_time(resp);
}

fn map(resp: &Value, page: &mut Page) {
    let base_url = text_or(resp, "base_url", "");
    page.title(&format!("Site Map: {base_url}"));

    let results = items(resp, "results");
    page.section(&format!("URLs Found ({})", results.len()));

    let bullet = match page.markup {
        Markup::Markdown => "- ",
        Markup::Text => "  ",
    };
    for entry in results {
        let url = if entry.is_object() {
            text_or(entry, "url", "")
        } else {
            scalar(entry)
        };
        page.line(format!("{bullet}{url}"));
    }

    page.response_time(resp);
}

fn usage(resp: &Value, page: &mut Page) {
    page.title("API Usage");

    let key = field(resp, "key").unwrap_or(&Value::Null);
    let account = field(resp, "account").unwrap_or(&Value::Null);

    let key_usage = count(key, "usage");
    let limit = field(key, "limit").map_or_else(|| "Unlimited".to_owned(), scalar);
    let plan = text_or(account, "current_plan", "Unknown");
    let plan_usage = format!("{} / {}", count(account, "plan_usage"), count(account, "plan_limit"));
    let paygo_usage = format!(
        "{} / {}",
        count(account, "paygo_usage"),
        count(account, "paygo_limit")
    );

    let key_rows = [("Usage", key_usage), ("Limit", limit)];
    let account_rows = [
        ("Plan", plan),
        ("Plan Usage", plan_usage),
        ("PayGo Usage", paygo_usage),
    ];

    match page.markup {
        Markup::Markdown => {
            page.line("## API Key");
            for (label, value) in &key_rows {
                page.line(format!("- **{label}:** {value}"));
            }
            page.blank();
            page.line("## Account");
            for (label, value) in &account_rows {
                page.line(format!("- **{label}:** {value}"));
            }
        }
        Markup::Text => {
            let header = page.paint("API Key:", Role::Section);
            page.line(header);
            for (label, value) in &key_rows {
                page.line(format!("  {label}: {value}"));
            }
            page.blank();
            let header = page.paint("Account:", Role::Section);
            page.line(header);
            for (label, value) in &account_rows {
                page.line(format!("  {label}: {value}"));
            }
        }
    }
}

// --- Output buffer ---

struct Page {
    markup: Markup,
    styler: Styler,
    buf: String,
}

impl Page {
    fn new(markup: Markup, styler: Styler) -> Self {
        Self {
            markup,
            styler,
            buf: String::new(),
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn paint(&self, text: &str, role: Role) -> String {
        self.styler.paint(text, role)
    }

    /// Top-level heading followed by a blank line.
    fn title(&mut self, text: &str) {
        match self.markup {
            Markup::Markdown => self.line(format!("# {text}")),
            Markup::Text => {
                let styled = self.paint(text, Role::Title);
                self.line(styled);
            }
        }
        self.blank();
    }

    /// Section heading followed by a blank line.
    fn section(&mut self, text: &str) {
        match self.markup {
            Markup::Markdown => self.line(format!("## {text}")),
            Markup::Text => {
                let styled = self.paint(&format!("{text}:"), Role::Section);
                self.line(styled);
            }
        }
        self.blank();
    }

    /// Trailing "Response time" line, only when the response carries one.
    fn response_time(&mut self, resp: &Value) {
        let Some(secs) = number(resp, "response_time") else {
            return;
        };
        self.blank();
        match self.markup {
            Markup::Markdown => self.line(format!("*Response time: {secs:.2}s*")),
            Markup::Text => {
                let styled = self.paint(&format!("Response time: {secs:.2}s"), Role::Muted);
                self.line(styled);
            }
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

// --- Field access ---

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    field(value, key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text_or(value: &Value, key: &str, default: &str) -> String {
    field(value, key).map_or_else(|| default.to_owned(), scalar)
}

fn count(value: &Value, key: &str) -> String {
    text_or(value, key, "0")
}

/// A number, or a string holding one.
fn number(value: &Value, key: &str) -> Option<f64> {
    match field(value, key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Display form of a value: strings unquoted, everything else as JSON.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn ellipsis(omitted: Option<usize>) -> &'static str {
    if omitted.is_some() { "..." } else { "" }
}
