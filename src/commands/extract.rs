/// `extract` command: fetch page content for one or more URLs.
use crate::api::{ExtractRequest, TavilyClient};
use crate::cli::args::ExtractArgs;
use crate::cli::output::write_response;
use crate::cli::{OutputCtx, ResponseKind};
use crate::errors::TavilyError;

/// Map `extract` arguments to a request body.
#[must_use]
pub fn build_request(args: &ExtractArgs) -> ExtractRequest {
    ExtractRequest {
        urls: args.urls.clone(),
        extract_depth: args.depth,
        format: args.output_format,
        include_images: args.include_images,
        timeout: args.timeout,
    }
}

/// Run `tavily extract`.
///
/// URLs the service could not fetch come back in `failed_results` and are
/// rendered, not treated as errors.
///
/// # Errors
///
/// Returns `TavilyError` on API failure.
pub async fn run(
    args: &ExtractArgs,
    client: &TavilyClient,
    ctx: &OutputCtx,
) -> Result<(), TavilyError> {
    let req = build_request(args);
    tracing::debug!(?req, "extract request");
    let response = client.extract(&req).await?;
    write_response(ResponseKind::Extract, &response, ctx)
}
