//! Application context: unified state passed to every command handler.

use anyhow::Result;

use crate::application::ports::ConfigSource;
use crate::domain::WardenConfig;
use crate::output::OutputContext;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `WARDEN_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Validated runtime configuration.
    pub config: WardenConfig,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `WARDEN_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded (e.g. no token).
    pub fn new(flags: &AppFlags, source: &impl ConfigSource) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("WARDEN_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            config: source.load()?,
            non_interactive,
        })
    }

    /// Ask the operator to confirm a destructive step. The prompt defaults
    /// to "no".
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `WARDEN_YES` env)
    /// the step counts as pre-approved and no prompt is shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.non_interactive {
            return Ok(true);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}
