#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! tavily: search, extract, crawl and map the web with the Tavily API.

mod api;
mod cli;
mod commands;
mod config;
mod errors;
mod logging;
mod types;

use clap::Parser;

use api::TavilyClient;
use cli::{Cli, OutputCtx, write_error};
use config::Settings;
use errors::TavilyError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run(&cli).await {
        write_error(&err, cli.format);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: &Cli) -> Result<(), TavilyError> {
    let settings = Settings::from_cli(cli)?;
    tracing::debug!(
        base_url = %settings.base_url,
        format = ?settings.format,
        verbose = settings.verbose,
        "settings resolved"
    );

    let client = TavilyClient::new(&settings.api_key, &settings.base_url)?;
    let ctx = OutputCtx::new(settings.format);
    commands::dispatch(&cli.command, &client, &ctx).await
}
