/// Runtime settings resolved from flags and the environment.
use crate::cli::{Cli, OutputFormat};
use crate::errors::TavilyError;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl Settings {
    /// Resolve settings from parsed arguments.
    ///
    /// clap has already merged `--api-key` with `TAVILY_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `TavilyError::MissingApiKey` when no non-blank key is set.
    pub fn from_cli(cli: &Cli) -> Result<Self, TavilyError> {
        Ok(Self {
            api_key: resolve_api_key(cli.api_key.as_deref())?,
            base_url: cli.base_url.clone(),
            format: cli.format,
            verbose: cli.verbose,
        })
    }
}

/// A usable API key, or `MissingApiKey` for absent or blank input.
///
/// # Errors
///
/// Returns `TavilyError::MissingApiKey` when `key` is `None` or blank.
pub fn resolve_api_key(key: Option<&str>) -> Result<String, TavilyError> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .ok_or(TavilyError::MissingApiKey)
}
