//! Progress indicators using indicatif

#![allow(clippy::expect_used)] // Templates are compile-time constants

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::Pause;
use crate::output::OutputContext;

/// Create a spinner for indeterminate progress.
///
/// # Panics
///
/// Panics if the spinner template string is invalid (it is a compile-time constant and will not panic).
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"])
            .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a checkmark on the left.
pub fn finish_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {prefix} {msg}")
            .expect("valid template"),
    );
    pb.set_prefix("✓");
    pb.finish_with_message(msg.to_string());
}

/// Wraps another `Pause` with a spinner while waiting, when progress is visible.
pub struct SpinnerPause<'a, P> {
    ctx: &'a OutputContext,
    inner: P,
}

impl<'a, P: Pause> SpinnerPause<'a, P> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext, inner: P) -> Self {
        Self { ctx, inner }
    }
}

impl<P: Pause> Pause for SpinnerPause<'_, P> {
    async fn pause(&self, duration: Duration) {
        if !self.ctx.show_progress() {
            self.inner.pause(duration).await;
            return;
        }
        let pb = spinner(&format!("waiting {}s", duration.as_secs()));
        self.inner.pause(duration).await;
        finish_ok(&pb, &format!("waited {}s", duration.as_secs()));
    }
}
