/// CLI layer: argument parsing, rendering, and output.
pub mod args;
pub mod output;
pub mod render;
pub mod style;

pub use args::{Cli, OutputFormat};
pub use output::{OutputCtx, write_error};
pub use render::ResponseKind;
