//! Terminal palette built on owo-colors styles.

use owo_colors::Style;

/// Style per message kind. The plain palette leaves text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// In-progress steps of a listing or migration.
    pub step: Style,
    /// Field labels and other secondary text.
    pub dim: Style,
    pub bold: Style,
    pub header: Style,
}

impl Styles {
    /// Palette for output that must stay free of ANSI escapes.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Palette for colour terminals.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            step: Style::new().cyan(),
            dim: Style::new().dimmed(),
            bold: Style::new().bold(),
            header: Style::new().bold().cyan(),
        }
    }

    #[must_use]
    pub fn for_terminal(color: bool) -> Self {
        if color { Self::colored() } else { Self::plain() }
    }
}
