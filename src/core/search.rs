use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Trailing-edge debounce for search input.
///
/// Every `on_input` call cancels the pending timer and starts a new one.
/// Once `delay` passes with no further input, the latest text is sent to
/// the sink exactly once. Only the timer is cancelled: a text already
/// handed to the sink is never recalled.
pub struct SearchDebouncer {
    delay: Duration,
    sink: UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration, sink: UnboundedSender<String>) -> Self {
        Self {
            delay,
            sink,
            pending: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn on_input(&mut self, text: impl Into<String>) {
        self.cancel();

        let text = text.into();
        let delay = self.delay;
        let sink = self.sink.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("Search input settled: {:?}", text);
            if sink.send(text).is_err() {
                tracing::debug!("Search sink closed, dropping query");
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Waits for the pending timer, if any, so its text reaches the sink.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                tracing::debug!("Pending search did not complete: {}", e);
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
