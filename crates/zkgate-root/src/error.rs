use std::time::Duration;

use zkgate_core::SignalError;

/// Failures reported by a ledger client.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("contract call failed: {0}")]
    Contract(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Outcome of a failed root check.
///
/// [`RootError::InvalidRoot`] means the check completed and the root is not
/// valid. The other variants mean the check could not be completed and say
/// nothing about the proof.
#[derive(Debug, thiserror::Error)]
pub enum RootError {
    #[error("invalid root")]
    InvalidRoot,

    #[error("root lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("{context}: {source}")]
    Ledger {
        context: &'static str,
        #[source]
        source: LedgerError,
    },
}

impl RootError {
    /// Whether the root itself was rejected, as opposed to the lookup failing.
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::InvalidRoot)
    }
}

impl From<SignalError> for RootError {
    fn from(_: SignalError) -> Self {
        Self::InvalidRoot
    }
}

/// Invalid root verifier configuration.
#[derive(Debug, thiserror::Error)]
pub enum RootConfigError {
    #[error("rpc endpoint is required unless the verifier is disabled")]
    MissingRpc,

    #[error("invalid contract address: {0:?}")]
    InvalidContract(String),
}
