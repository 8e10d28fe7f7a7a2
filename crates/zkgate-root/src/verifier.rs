use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::cached::CachedRootVerifier;
use crate::direct::DirectRootVerifier;
use crate::error::{LedgerError, RootError};
use crate::event_scan::EventScanRootVerifier;
use crate::ledger::{RootEventLog, RootSource, RootValidity};

/// Default bound of one ledger round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default lifetime of a cached root.
pub const DEFAULT_CACHE_EXPIRATION: Duration = Duration::from_secs(10);

/// Checks a decimal root from proof signals against its source of truth.
#[derive(Debug, Clone, Default)]
pub enum RootVerifier {
    /// No source of truth configured: every root is accepted.
    #[default]
    Disabled,
    Direct(DirectRootVerifier),
    Cached(CachedRootVerifier),
    EventScan(EventScanRootVerifier),
}

impl RootVerifier {
    pub fn disabled() -> Self {
        Self::Disabled
    }

    pub fn direct(caller: Arc<dyn RootValidity>, timeout: Duration) -> Self {
        Self::Direct(DirectRootVerifier::new(caller, timeout))
    }

    pub fn cached(source: Arc<dyn RootSource>, timeout: Duration, ttl: Duration) -> Self {
        Self::Cached(CachedRootVerifier::new(source, timeout, ttl))
    }

    pub fn event_scan(log: Arc<dyn RootEventLog>, timeout: Duration) -> Self {
        Self::EventScan(EventScanRootVerifier::new(log, timeout))
    }

    /// Whether roots pass without being checked. Lets callers tell
    /// "accepted unchecked" apart from "checked and valid".
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Direct(_) => "direct",
            Self::Cached(_) => "cached",
            Self::EventScan(_) => "event_scan",
        }
    }

    /// Check a root given as a decimal big integer. Input that is not a
    /// decimal integer of at most 32 bytes is an invalid root.
    pub async fn verify_root(&self, root: &str) -> Result<(), RootError> {
        match self {
            Self::Disabled => Ok(()),
            Self::Direct(v) => v.verify_root(root).await,
            Self::Cached(v) => v.verify_root(root).await,
            Self::EventScan(v) => v.verify_root(root).await,
        }
    }
}

/// Run one ledger call under `timeout`.
pub(crate) async fn bounded<T>(
    timeout: Duration,
    context: &'static str,
    call: impl Future<Output = Result<T, LedgerError>>,
) -> Result<T, RootError> {
    bounded_until(Instant::now() + timeout, timeout, context, call).await
}

/// Like [`bounded`], with a deadline taken earlier by the caller. Errors
/// report `timeout`, the verifier's full request budget.
pub(crate) async fn bounded_until<T>(
    deadline: Instant,
    timeout: Duration,
    context: &'static str,
    call: impl Future<Output = Result<T, LedgerError>>,
) -> Result<T, RootError> {
    match tokio::time::timeout_at(deadline, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => {
            tracing::warn!(error = %source, "{}", context);
            Err(RootError::Ledger { context, source })
        }
        Err(_) => {
            tracing::warn!(timeout = ?timeout, "{} timed out", context);
            Err(RootError::Timeout(timeout))
        }
    }
}
