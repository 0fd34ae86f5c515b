//! Output formatting module

pub mod human;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};

pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Whether to emit colour: never when asked not to, when `NO_COLOR` is set,
/// or when stdout is not a terminal.
#[must_use]
pub fn wants_color(no_color: bool, is_tty: bool, no_color_env: bool) -> bool {
    !no_color && !no_color_env && is_tty
}

/// Where operator-facing messages go and how they look.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a terminal; spinners only render on one.
    pub is_tty: bool,
    /// Suppresses everything except errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Build the context from the `--no-color` / `--quiet` flags and the
    /// current terminal.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let color = wants_color(no_color, is_tty, std::env::var_os("NO_COLOR").is_some());
        Self {
            styles: Styles::for_terminal(color),
            is_tty,
            quiet,
        }
    }

    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    fn mark(&self, glyph: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", glyph.style(style));
        }
    }

    pub fn step(&self, msg: &str) {
        self.mark("→", self.styles.step, msg);
    }

    pub fn success(&self, msg: &str) {
        self.mark("✓", self.styles.success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.mark("⚠", self.styles.warning, msg);
    }

    pub fn info(&self, msg: &str) {
        self.mark("ℹ", self.styles.info, msg);
    }

    /// Errors go to stderr and ignore `quiet`.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// A summary line: dimmed label, then value.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}
