/// `map` command: discover URLs under a root without extracting content.
use super::crawl::build_scope;
use crate::api::{MapRequest, TavilyClient};
use crate::cli::args::MapArgs;
use crate::cli::output::write_response;
use crate::cli::{OutputCtx, ResponseKind};
use crate::errors::TavilyError;

/// Map `map` arguments to a request body.
#[must_use]
pub fn build_request(args: &MapArgs) -> MapRequest {
    MapRequest {
        scope: build_scope(&args.scope),
    }
}

/// Run `tavily map`.
///
/// # Errors
///
/// Returns `TavilyError` on API failure.
pub async fn run(args: &MapArgs, client: &TavilyClient, ctx: &OutputCtx) -> Result<(), TavilyError> {
    let req = build_request(args);
    tracing::debug!(?req, "map request");
    let response = client.map(&req).await?;
    write_response(ResponseKind::Map, &response, ctx)
}
