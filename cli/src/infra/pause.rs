//! Infrastructure implementation of the `Pause` port.

use std::time::Duration;

use crate::application::ports::Pause;

/// Sleeps on the tokio timer.
pub struct TokioPause;

impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
