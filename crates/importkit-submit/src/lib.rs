//! One-shot asynchronous confirmation of a finalized import batch.
//!
//! The submission is accepted, handed to an external system (simulated by a
//! fixed delay) and either resolves with a success message or rejects with
//! a failure message. Each call makes exactly one terminal transition:
//! the await point is the pending state, and the single return value is the
//! resolution. There are no retries and no partial results.

mod error;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use importkit_model::Record;

pub use error::SubmitError;

/// Samples whether the external system reports a failure for this
/// submission. Injected so no hidden mutable state decides the outcome.
pub type ErrorProbe = Arc<dyn Fn() -> bool + Send + Sync>;

/// User-facing terminal messages; both ends are caller-controlled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitMessages {
    pub success: String,
    pub failure: String,
}

impl Default for SubmitMessages {
    fn default() -> Self {
        Self {
            success: "Upload successful".to_string(),
            failure: "Upload rejected".to_string(),
        }
    }
}

/// Resolves or rejects one submission after the simulated confirmation
/// delay.
pub struct Submitter {
    delay: Duration,
    messages: SubmitMessages,
    error_probe: ErrorProbe,
}

impl Submitter {
    /// Confirmation delay of the reference behavior.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

    pub fn new(error_probe: ErrorProbe) -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            messages: SubmitMessages::default(),
            error_probe,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_messages(mut self, messages: SubmitMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Submit the finalized record set and await the confirmation.
    ///
    /// Resolves to the success message or rejects with the failure message
    /// depending on the injected probe; cancelling the token before the
    /// confirmation arrives rejects with [`SubmitError::Canceled`] so a
    /// stalled external system cannot block the caller forever.
    pub async fn submit(
        &self,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<String, SubmitError> {
        debug!(records = records.len(), "submission accepted, awaiting confirmation");

        tokio::select! {
            _ = cancel.cancelled() => {
                info!("submission canceled before confirmation");
                Err(SubmitError::Canceled)
            }
            _ = tokio::time::sleep(self.delay) => {
                if (self.error_probe)() {
                    info!(records = records.len(), "submission rejected");
                    Err(SubmitError::Rejected {
                        message: self.messages.failure.clone(),
                    })
                } else {
                    info!(records = records.len(), "submission resolved");
                    Ok(self.messages.success.clone())
                }
            }
        }
    }

    /// Observational notification that the user abandoned the import flow
    /// before submitting. Audit-logged; nothing is returned.
    pub fn notify_canceled(&self) {
        info!("import canceled before submission");
    }
}
