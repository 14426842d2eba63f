/// Terminal styling. Purely cosmetic: with color off, text passes through.
use owo_colors::{OwoColorize, Style};

/// Semantic role of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Document title (e.g. "Search: ...").
    Title,
    /// Section header (e.g. "Results (5):").
    Section,
    /// The LLM answer header.
    Answer,
    /// Item heading inside a section.
    Item,
    /// A URL.
    Link,
    /// Trailing metadata such as response time.
    Muted,
    /// Failure header.
    Failure,
    /// Key label in the generic mapping printer.
    Label,
}

impl Role {
    fn style(self) -> Style {
        match self {
            Self::Title => Style::new().blue().bold(),
            Self::Link => Style::new().blue(),
            Self::Section => Style::new().yellow().bold(),
            Self::Answer => Style::new().green().bold(),
            Self::Item => Style::new().bold(),
            Self::Muted => Style::new().bright_black(),
            Self::Failure => Style::new().red().bold(),
            Self::Label => Style::new().yellow(),
        }
    }
}

/// Applies [`Role`] styles when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// No-op styler.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Style `text` for `role`, or return it unchanged when disabled.
    #[must_use]
    pub fn paint(&self, text: &str, role: Role) -> String {
        if self.enabled {
            text.style(role.style()).to_string()
        } else {
            text.to_owned()
        }
    }
}
