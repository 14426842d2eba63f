/// Output: rendering responses to stdout and errors to stderr. TTY detection.
use std::io::{ErrorKind, IsTerminal, Write};

use serde_json::Value;

use super::args::OutputFormat;
use super::render::{ResponseKind, render, render_tree};
use super::style::{Role, Styler};
use crate::errors::TavilyError;
use crate::types::ErrorOutput;

/// Whether text output should be colored.
///
/// Only text mode is ever colored, only on a terminal, and never when
/// `NO_COLOR` is set to a non-empty value.
#[must_use]
pub fn color_enabled(format: OutputFormat, is_terminal: bool, no_color: Option<&str>) -> bool {
    format == OutputFormat::Text && is_terminal && no_color.is_none_or(str::is_empty)
}

/// Output context passed to all commands.
#[derive(Debug, Clone, Copy)]
pub struct OutputCtx {
    pub format: OutputFormat,
    pub styler: Styler,
}

impl OutputCtx {
    /// Construct for `format`, detecting color support on stdout.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        let no_color = std::env::var("NO_COLOR").ok();
        let color = color_enabled(format, std::io::stdout().is_terminal(), no_color.as_deref());
        Self {
            format,
            styler: Styler::new(color),
        }
    }
}

/// Render a response and write it to stdout.
///
/// # Errors
///
/// Returns `TavilyError::Serialize` if json output cannot be produced and
/// `TavilyError::Io` if stdout cannot be written.
pub fn write_response(
    kind: ResponseKind,
    response: &Value,
    ctx: &OutputCtx,
) -> Result<(), TavilyError> {
    let out = render(kind, response, ctx.format, ctx.styler)?;
    write_output(&mut std::io::stdout().lock(), &out)
}

/// Write rendered output to `writer`.
///
/// A closed pipe (e.g. `| head`) counts as success.
///
/// # Errors
///
/// Returns `TavilyError::Io` for any other write failure.
pub fn write_output<W: Write>(writer: &mut W, out: &str) -> Result<(), TavilyError> {
    match writer.write_all(out.as_bytes()).and_then(|()| writer.flush()) {
        Err(err) if err.kind() != ErrorKind::BrokenPipe => Err(err.into()),
        _ => Ok(()),
    }
}

/// Format an error for stderr.
#[must_use]
pub fn format_error(err: &ErrorOutput, format: OutputFormat, styler: Styler) -> String {
    if format == OutputFormat::Json {
        let mut s = serde_json::to_string_pretty(err).unwrap_or_default();
        s.push('\n');
        return s;
    }

    let mut out = styler.paint(&format!("Error: {}", err.error.message), Role::Failure);
    out.push('\n');
    if let Some(hint) = &err.error.hint {
        out.push_str(hint);
        out.push('\n');
    }
    if let Some(Value::Object(details)) = &err.error.details {
        out.push_str(&styler.paint("Details:", Role::Section));
        out.push('\n');
        out.push_str(&render_tree(details, 1, styler));
    }
    out
}

/// Write a structured error to stderr.
pub fn write_error(err: &TavilyError, format: OutputFormat) {
    let no_color = std::env::var("NO_COLOR").ok();
    let color = color_enabled(format, std::io::stderr().is_terminal(), no_color.as_deref());
    let text = format_error(&ErrorOutput::from_error(err), format, Styler::new(color));
    let _ = std::io::stderr().lock().write_all(text.as_bytes());
}
