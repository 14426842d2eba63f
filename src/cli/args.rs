/// CLI argument definitions via clap derive.
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::api::{ContentFormat, DEFAULT_BASE_URL, Depth, TimeRange, Topic};

/// Tavily CLI - AI-powered search from the command line.
///
/// Get your free API key at: https://app.tavily.com
#[derive(Debug, Parser)]
#[command(name = "tavily", version, arg_required_else_help = true)]
pub struct Cli {
    #[arg(
        help = "Tavily API key (default: $TAVILY_API_KEY)",
        short = 'k',
        long,
        global = true,
        env = "TAVILY_API_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub api_key: Option<String>,

    /// Output format.
    #[arg(
        short = 'f',
        long = "format",
        global = true,
        value_name = "FORMAT",
        default_value = "text"
    )]
    pub format: OutputFormat,

    /// Enable debug output on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// API base URL.
    #[arg(
        long,
        global = true,
        hide = true,
        env = "TAVILY_BASE_URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Raw API response, pretty-printed.
    Json,
    /// Human-readable sections, colored on a terminal.
    #[default]
    Text,
    /// Markdown headings, links and lists.
    Markdown,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a web search query.
    ///
    /// Example: tavily search "who is Leo Messi?" -d advanced -a
    Search(SearchArgs),
    /// Extract content from one or more URLs.
    ///
    /// Example: tavily extract https://example.com https://example.org
    Extract(ExtractArgs),
    /// Crawl a website and extract content from discovered pages.
    ///
    /// Example: tavily crawl https://docs.example.com -i "Find API docs" --limit 20
    Crawl(CrawlArgs),
    /// Generate a site map (URLs only, no content extraction).
    ///
    /// Example: tavily map https://example.com --max-depth 2
    Map(MapArgs),
    /// Show API key and account usage statistics.
    Usage,
}

/// Arguments for `tavily search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query.
    pub query: String,

    /// Search depth (basic=1 credit, advanced=2 credits).
    #[arg(short = 'd', long, default_value = "basic")]
    pub depth: Depth,

    /// Search topic.
    #[arg(short = 't', long, default_value = "general")]
    pub topic: Topic,

    /// Maximum results (1-20).
    #[arg(
        short = 'n',
        long,
        value_name = "N",
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=20)
    )]
    pub max_results: u8,

    /// Filter by time range.
    #[arg(long, value_name = "RANGE")]
    pub time_range: Option<TimeRange>,

    /// Include LLM answer (basic or advanced).
    #[arg(
        short = 'a',
        long,
        value_name = "MODE",
        num_args = 0..=1,
        default_missing_value = "basic",
        value_parser = ["basic", "advanced", "true", "True"]
    )]
    pub include_answer: Option<String>,

    /// Include raw content (markdown or text).
    #[arg(
        short = 'r',
        long = "include-raw",
        value_name = "MODE",
        num_args = 0..=1,
        default_missing_value = "markdown",
        value_parser = ["markdown", "text", "true", "True"]
    )]
    pub include_raw: Option<String>,

    /// Include image results.
    #[arg(long)]
    pub include_images: bool,

    /// Comma-separated domains to include.
    #[arg(long, value_name = "DOMAINS")]
    pub include_domains: Option<String>,

    /// Comma-separated domains to exclude.
    #[arg(long, value_name = "DOMAINS")]
    pub exclude_domains: Option<String>,

    /// Boost results from country.
    #[arg(long)]
    pub country: Option<String>,
}

/// Arguments for `tavily extract`.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// URLs to extract.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Extraction depth.
    #[arg(short = 'd', long, default_value = "basic")]
    pub depth: Depth,

    /// Content format.
    #[arg(long, default_value = "markdown")]
    pub output_format: ContentFormat,

    /// Include images.
    #[arg(long)]
    pub include_images: bool,

    /// Timeout in seconds (1-60).
    #[arg(long, value_name = "SECONDS", value_parser = parse_extract_timeout)]
    pub timeout: Option<f64>,
}

/// Link-following options shared by `crawl` and `map`.
#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Root URL to start from.
    pub url: String,

    /// Natural language crawl instructions.
    #[arg(short = 'i', long)]
    pub instructions: Option<String>,

    /// Max crawl depth (1-5).
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=5)
    )]
    pub max_depth: u8,

    /// Links per page.
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub max_breadth: u32,

    /// Total pages to process.
    #[arg(short = 'n', long, value_name = "N", default_value_t = 50)]
    pub limit: u32,

    /// Comma-separated regex patterns for paths to include.
    #[arg(long, value_name = "PATTERNS")]
    pub select_paths: Option<String>,

    /// Comma-separated regex patterns for paths to exclude.
    #[arg(long, value_name = "PATTERNS")]
    pub exclude_paths: Option<String>,

    /// Comma-separated regex patterns for domains to include.
    #[arg(long, value_name = "PATTERNS")]
    pub select_domains: Option<String>,

    /// Comma-separated regex patterns for domains to exclude.
    #[arg(long, value_name = "PATTERNS")]
    pub exclude_domains: Option<String>,

    /// Exclude external links.
    #[arg(long)]
    pub no_external: bool,

    /// Timeout in seconds (10-150).
    #[arg(long, value_name = "SECONDS", value_parser = parse_crawl_timeout)]
    pub timeout: Option<f64>,
}

/// Arguments for `tavily crawl`.
#[derive(Debug, Args)]
pub struct CrawlArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Extraction depth.
    #[arg(short = 'd', long, default_value = "basic")]
    pub depth: Depth,

    /// Include images.
    #[arg(long)]
    pub include_images: bool,
}

/// Arguments for `tavily map`.
#[derive(Debug, Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
}

fn parse_extract_timeout(s: &str) -> Result<f64, String> {
    parse_seconds(s, 1.0, 60.0)
}

fn parse_crawl_timeout(s: &str) -> Result<f64, String> {
    parse_seconds(s, 10.0, 150.0)
}

fn parse_seconds(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in the range {min}<=x<={max}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tavily").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_defaults() {
        let cli = parse(&["-k", "key", "search", "rust"]).expect("parse");
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.api_key.as_deref(), Some("key"));
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.query, "rust");
        assert_eq!(args.depth, Depth::Basic);
        assert_eq!(args.topic, Topic::General);
        assert_eq!(args.max_results, 5);
        assert!(args.include_answer.is_none());
        assert!(args.include_raw.is_none());
    }

    #[test]
    fn test_search_options() {
        let cli = parse(&[
            "search", "test", "-d", "advanced", "-t", "news", "-n", "10", "-a",
        ])
        .expect("parse");
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.depth, Depth::Advanced);
        assert_eq!(args.topic, Topic::News);
        assert_eq!(args.max_results, 10);
        assert_eq!(args.include_answer.as_deref(), Some("basic"));
    }

    #[test]
    fn test_include_flags_accept_modes() {
        let cli = parse(&["search", "q", "--include-answer", "advanced", "-r", "true"])
            .expect("parse");
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.include_answer.as_deref(), Some("advanced"));
        assert_eq!(args.include_raw.as_deref(), Some("true"));

        let err = parse(&["search", "q", "-a", "verbose"]).expect_err("bad mode");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_max_results_out_of_range() {
        for n in ["0", "21", "25"] {
            let err = parse(&["search", "q", "-n", n]).expect_err("out of range");
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
            assert_ne!(err.exit_code(), 0);
        }
        assert!(parse(&["search", "q", "-n", "20"]).is_ok());
        assert!(parse(&["search", "q", "-n", "1"]).is_ok());
    }

    #[test]
    fn test_invalid_enum_choice() {
        let err = parse(&["search", "q", "-t", "sports"]).expect_err("bad topic");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        let err = parse(&["-f", "yaml", "usage"]).expect_err("bad format");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_time_range_short_and_long() {
        for (raw, want) in [("week", TimeRange::Week), ("y", TimeRange::Y)] {
            let cli = parse(&["search", "q", "--time-range", raw]).expect("parse");
            let Command::Search(args) = cli.command else {
                panic!("expected search");
            };
            assert_eq!(args.time_range, Some(want));
        }
    }

    #[test]
    fn test_extract_requires_urls_and_bounds_timeout() {
        assert!(parse(&["extract"]).is_err());

        let cli = parse(&["extract", "https://example.com", "https://example.org"])
            .expect("parse");
        let Command::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.urls.len(), 2);
        assert_eq!(args.output_format, ContentFormat::Markdown);

        assert!(parse(&["extract", "https://x", "--timeout", "60"]).is_ok());
        assert!(parse(&["extract", "https://x", "--timeout", "0.5"]).is_err());
        assert!(parse(&["extract", "https://x", "--timeout", "61"]).is_err());
        assert!(parse(&["extract", "https://x", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn test_crawl_and_map_bounds() {
        assert!(parse(&["crawl", "https://x", "--max-depth", "5"]).is_ok());
        assert!(parse(&["crawl", "https://x", "--max-depth", "6"]).is_err());
        assert!(parse(&["map", "https://x", "--max-depth", "0"]).is_err());
        assert!(parse(&["map", "https://x", "--timeout", "9"]).is_err());
        assert!(parse(&["map", "https://x", "--timeout", "150"]).is_ok());
        assert!(parse(&["crawl", "https://x", "--timeout", "151"]).is_err());
    }

    #[test]
    fn test_crawl_options() {
        let cli = parse(&[
            "crawl",
            "https://example.com",
            "-i",
            "Find API docs",
            "--no-external",
            "-n",
            "20",
        ])
        .expect("parse");
        let Command::Crawl(args) = cli.command else {
            panic!("expected crawl");
        };
        assert_eq!(args.scope.instructions.as_deref(), Some("Find API docs"));
        assert!(args.scope.no_external);
        assert_eq!(args.scope.limit, 20);
        assert_eq!(args.scope.max_breadth, 20);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["usage", "-f", "json", "-v"]).expect("parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Usage));
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("10", 10.0, 150.0), Ok(10.0));
        assert!(parse_seconds("9.99", 10.0, 150.0).is_err());
    }
}
