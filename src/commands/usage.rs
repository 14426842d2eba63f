/// `usage` command: key and account usage statistics.
use crate::api::TavilyClient;
use crate::cli::output::write_response;
use crate::cli::{OutputCtx, ResponseKind};
use crate::errors::TavilyError;

/// Run `tavily usage`.
///
/// # Errors
///
/// Returns `TavilyError` on network failure, timeout, or non-2xx status.
pub async fn run(client: &TavilyClient, ctx: &OutputCtx) -> Result<(), TavilyError> {
    let response = client.usage().await?;
    write_response(ResponseKind::Usage, &response, ctx)
}
