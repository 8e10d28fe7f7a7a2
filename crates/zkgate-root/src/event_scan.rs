use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use zkgate_core::decimal_to_bytes32;

use crate::error::RootError;
use crate::ledger::{EventWindow, RootEventLog};
use crate::verifier::bounded;

/// Accepts a root once the contract has ever emitted a `RootUpdated` event
/// for it within the configured block window.
#[derive(Clone)]
pub struct EventScanRootVerifier {
    log: Arc<dyn RootEventLog>,
    timeout: Duration,
    window: EventWindow,
}

impl EventScanRootVerifier {
    pub fn new(log: Arc<dyn RootEventLog>, timeout: Duration) -> Self {
        Self {
            log,
            timeout,
            window: EventWindow::default(),
        }
    }

    /// Restrict the scan to a block range.
    pub fn with_window(mut self, window: EventWindow) -> Self {
        self.window = window;
        self
    }

    pub async fn verify_root(&self, root: &str) -> Result<(), RootError> {
        let root = decimal_to_bytes32(root)?;

        let events = bounded(
            self.timeout,
            "filter RootUpdated events",
            self.log.root_updated_events(root, self.window),
        )
        .await?;

        match events.first() {
            Some(event) => {
                tracing::debug!(block = event.block_number, "root found in event log");
                Ok(())
            }
            None => Err(RootError::InvalidRoot),
        }
    }
}

impl fmt::Debug for EventScanRootVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventScanRootVerifier")
            .field("timeout", &self.timeout)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
