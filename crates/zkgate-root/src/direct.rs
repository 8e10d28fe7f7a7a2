use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use zkgate_core::decimal_to_bytes32;

use crate::error::RootError;
use crate::ledger::RootValidity;
use crate::verifier::bounded;

/// Asks the contract about every root, one bounded call per check.
#[derive(Clone)]
pub struct DirectRootVerifier {
    caller: Arc<dyn RootValidity>,
    timeout: Duration,
}

impl DirectRootVerifier {
    pub fn new(caller: Arc<dyn RootValidity>, timeout: Duration) -> Self {
        Self { caller, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn verify_root(&self, root: &str) -> Result<(), RootError> {
        let root = decimal_to_bytes32(root)?;

        let valid = bounded(
            self.timeout,
            "call isRootValid",
            self.caller.is_root_valid(root),
        )
        .await?;

        if !valid {
            return Err(RootError::InvalidRoot);
        }
        Ok(())
    }
}

impl fmt::Debug for DirectRootVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectRootVerifier")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
