/// `crawl` command: follow links from a root URL and extract page content.
use crate::api::{CrawlRequest, CrawlScope, TavilyClient, parse_list};
use crate::cli::args::{CrawlArgs, ScopeArgs};
use crate::cli::output::write_response;
use crate::cli::{OutputCtx, ResponseKind};
use crate::errors::TavilyError;

/// Map link-following options shared with `map`.
#[must_use]
pub fn build_scope(args: &ScopeArgs) -> CrawlScope {
    CrawlScope {
        url: args.url.clone(),
        max_depth: args.max_depth,
        max_breadth: args.max_breadth,
        limit: args.limit,
        allow_external: !args.no_external,
        instructions: args.instructions.clone().filter(|i| !i.trim().is_empty()),
        select_paths: parse_list(args.select_paths.as_deref()),
        exclude_paths: parse_list(args.exclude_paths.as_deref()),
        select_domains: parse_list(args.select_domains.as_deref()),
        exclude_domains: parse_list(args.exclude_domains.as_deref()),
        timeout: args.timeout,
    }
}

/// Map `crawl` arguments to a request body.
#[must_use]
pub fn build_request(args: &CrawlArgs) -> CrawlRequest {
    CrawlRequest {
        scope: build_scope(&args.scope),
        extract_depth: args.depth,
        include_images: args.include_images,
    }
}

/// Run `tavily crawl`.
///
/// # Errors
///
/// Returns `TavilyError` on API failure.
pub async fn run(
    args: &CrawlArgs,
    client: &TavilyClient,
    ctx: &OutputCtx,
) -> Result<(), TavilyError> {
    let req = build_request(args);
    tracing::debug!(?req, "crawl request");
    let response = client.crawl(&req).await?;
    write_response(ResponseKind::Crawl, &response, ctx)
}
