//! Root check against a cached copy of the contract's current root.
//!
//! The cache trades freshness for fewer ledger calls. Within one TTL window
//! a root that has just been published can be rejected, and a root that has
//! since been replaced on-chain is still accepted until the window ends.
//! Pick the TTL with that in mind.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use zkgate_core::decimal_to_bytes32;

use crate::error::RootError;
use crate::ledger::RootSource;
use crate::verifier::bounded_until;

#[derive(Debug, Clone, Copy)]
struct CachedRoot {
    root: [u8; 32],
    fetched_at: Instant,
}

/// Compares roots with the contract's current root, fetched at most once per
/// TTL. Clones share one cache; build separate verifiers for separate roots.
#[derive(Clone)]
pub struct CachedRootVerifier {
    source: Arc<dyn RootSource>,
    timeout: Duration,
    ttl: Duration,
    cache: Arc<Mutex<Option<CachedRoot>>>,
}

impl CachedRootVerifier {
    pub fn new(source: Arc<dyn RootSource>, timeout: Duration, ttl: Duration) -> Self {
        Self {
            source,
            timeout,
            ttl,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn verify_root(&self, root: &str) -> Result<(), RootError> {
        let root = decimal_to_bytes32(root)?;
        let current = self.current_root().await?;

        if current != root {
            tracing::debug!(
                provided = %hex::encode(root),
                stored = %hex::encode(current),
                "root mismatch"
            );
            return Err(RootError::InvalidRoot);
        }
        Ok(())
    }

    /// Cached root, refreshed when missing or older than the TTL. The lock
    /// is held across the refresh so concurrent callers wait for one fetch.
    /// Waiting for the lock and the fetch share one request timeout.
    async fn current_root(&self) -> Result<[u8; 32], RootError> {
        let deadline = Instant::now() + self.timeout;
        let mut cache = match tokio::time::timeout_at(deadline, self.cache.lock()).await {
            Ok(guard) => guard,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "waiting for root refresh timed out");
                return Err(RootError::Timeout(self.timeout));
            }
        };

        if let Some(cached) = *cache {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(cached.root);
            }
        }

        let root = bounded_until(
            deadline,
            self.timeout,
            "fetch current root",
            self.source.current_root(),
        )
        .await?;
        tracing::debug!(root = %hex::encode(root), ttl = ?self.ttl, "refreshed cached root");

        *cache = Some(CachedRoot {
            root,
            fetched_at: Instant::now(),
        });
        Ok(root)
    }
}

impl fmt::Debug for CachedRootVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedRootVerifier")
            .field("timeout", &self.timeout)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
