/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod crawl;
pub mod extract;
pub mod map;
pub mod search;
pub mod usage;

use crate::api::TavilyClient;
use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::errors::TavilyError;

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `TavilyError` on any command failure.
pub async fn dispatch(
    command: &Command,
    client: &TavilyClient,
    ctx: &OutputCtx,
) -> Result<(), TavilyError> {
    match command {
        Command::Search(args) => search::run(args, client, ctx).await,
        Command::Extract(args) => extract::run(args, client, ctx).await,
        Command::Crawl(args) => crawl::run(args, client, ctx).await,
        Command::Map(args) => map::run(args, client, ctx).await,
        Command::Usage => usage::run(client, ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, OutputFormat};
    use crate::cli::style::Styler;
    use clap::Parser;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> OutputCtx {
        OutputCtx {
            format: OutputFormat::Json,
            styler: Styler::plain(),
        }
    }

    fn command(argv: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("tavily").chain(argv.iter().copied()))
            .expect("parse")
            .command
    }

    #[tokio::test]
    async fn test_partial_extract_failure_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/extract"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"url": "https://example.com", "raw_content": "Page content here"}],
                "failed_results": [{"url": "https://broken.example", "error": "404"}],
                "response_time": 0.5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TavilyClient::new("k", &server.uri()).expect("client");
        let cmd = command(&["extract", "https://example.com", "https://broken.example"]);
        assert!(dispatch(&cmd, &client, &ctx()).await.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .expect(1)
            .mount(&server)
            .await;

        let client = TavilyClient::new("k", &server.uri()).expect("client");
        let err = dispatch(&command(&["map", "https://example.com"]), &client, &ctx())
            .await
            .expect_err("500 must fail");
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.code(), "api_error");
    }

    #[tokio::test]
    async fn test_usage_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/usage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key": {"usage": 150, "limit": null},
                "account": {"current_plan": "Researcher"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TavilyClient::new("k", &server.uri()).expect("client");
        assert!(dispatch(&Command::Usage, &client, &ctx()).await.is_ok());
    }
}
