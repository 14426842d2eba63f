/// `search` command: web search with optional answer, raw content and images.
use crate::api::{ModeFlag, SearchRequest, TavilyClient, parse_list};
use crate::cli::args::SearchArgs;
use crate::cli::output::write_response;
use crate::cli::{OutputCtx, ResponseKind};
use crate::errors::TavilyError;

/// Map `search` arguments to a request body.
#[must_use]
pub fn build_request(args: &SearchArgs) -> SearchRequest {
    SearchRequest {
        query: args.query.clone(),
        search_depth: args.depth,
        topic: args.topic,
        max_results: args.max_results,
        include_images: args.include_images,
        time_range: args.time_range,
        include_answer: args.include_answer.as_deref().map(ModeFlag::from_value),
        include_raw_content: args.include_raw.as_deref().map(ModeFlag::from_value),
        include_domains: parse_list(args.include_domains.as_deref()),
        exclude_domains: parse_list(args.exclude_domains.as_deref()),
        country: args.country.clone().filter(|c| !c.trim().is_empty()),
    }
}

/// Run `tavily search`.
///
/// # Errors
///
/// Returns `TavilyError` on API failure.
pub async fn run(
    args: &SearchArgs,
    client: &TavilyClient,
    ctx: &OutputCtx,
) -> Result<(), TavilyError> {
    let req = build_request(args);
    tracing::debug!(?req, "search request");
    let response = client.search(&req).await?;
    write_response(ResponseKind::Search, &response, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Depth, Topic};
    use crate::cli::Cli;
    use crate::cli::args::Command;
    use clap::Parser;
    use serde_json::json;

    fn args(argv: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(std::iter::once("tavily").chain(argv.iter().copied()))
            .expect("parse");
        match cli.command {
            Command::Search(a) => a,
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_request_omits_optionals() {
        let req = build_request(&args(&["search", "rust"]));
        assert_eq!(
            serde_json::to_value(&req).unwrap_or_default(),
            json!({
                "query": "rust",
                "search_depth": "basic",
                "topic": "general",
                "max_results": 5,
                "include_images": false,
            })
        );
    }

    #[test]
    fn test_options_are_forwarded() {
        let req = build_request(&args(&[
            "search", "test", "-d", "advanced", "-t", "news", "-n", "10", "-a",
        ]));
        assert_eq!(req.search_depth, Depth::Advanced);
        assert_eq!(req.topic, Topic::News);
        assert_eq!(req.max_results, 10);
        assert_eq!(req.include_answer, Some(ModeFlag::Named("basic".to_owned())));
    }

    #[test]
    fn test_true_sentinel_becomes_boolean() {
        let req = build_request(&args(&["search", "q", "-a", "true", "--include-raw", "True"]));
        let body = serde_json::to_value(&req).unwrap_or_default();
        assert_eq!(body["include_answer"], json!(true));
        assert_eq!(body["include_raw_content"], json!(true));

        let req = build_request(&args(&["search", "q", "-r"]));
        assert_eq!(req.include_raw_content, Some(ModeFlag::Named("markdown".to_owned())));
    }

    #[test]
    fn test_domain_lists() {
        let req = build_request(&args(&[
            "search",
            "q",
            "--include-domains",
            "python.org, docs.rs ,",
            "--exclude-domains",
            "",
            "--country",
            "germany",
        ]));
        assert_eq!(
            req.include_domains,
            Some(vec!["python.org".to_owned(), "docs.rs".to_owned()])
        );
        assert_eq!(req.exclude_domains, None);
        assert_eq!(req.country.as_deref(), Some("germany"));
    }
}
