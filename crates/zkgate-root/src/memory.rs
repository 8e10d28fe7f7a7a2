//! In-memory ledger for tests and offline verification.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LedgerError;
use crate::ledger::{EventWindow, RootEventLog, RootSource, RootUpdatedEvent, RootValidity};

#[derive(Debug, Default)]
struct LedgerState {
    current: [u8; 32],
    valid: HashSet<[u8; 32]>,
    events: Vec<RootUpdatedEvent>,
    failure: Option<String>,
    delay: Option<Duration>,
}

/// A ledger held in memory. Serves all three ledger queries and can be told
/// to fail or to answer slowly.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
    calls: AtomicUsize,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose current and only valid root is `root`.
    pub fn with_root(root: [u8; 32]) -> Self {
        let ledger = Self::new();
        ledger.set_current_root(root);
        ledger
    }

    /// Like [`MemoryLedger::with_root`], from hex. Shorter values are
    /// left-padded with zeros.
    pub fn with_root_hex(root: &str) -> Result<Self, LedgerError> {
        let bytes = hex::decode(root).map_err(|e| LedgerError::Decode(e.to_string()))?;
        if bytes.len() > 32 {
            return Err(LedgerError::Decode(format!(
                "root is {} bytes, expected at most 32",
                bytes.len()
            )));
        }
        let mut padded = [0u8; 32];
        padded[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self::with_root(padded))
    }

    /// Publish a new current root. It becomes valid, the previous one stops
    /// being valid, and a `RootUpdated` event is recorded.
    pub fn set_current_root(&self, root: [u8; 32]) {
        let mut state = self.lock();
        let previous = state.current;
        state.valid.remove(&previous);
        state.current = root;
        state.valid.insert(root);
        let block = state.events.last().map_or(1, |e| e.block_number + 1);
        state.events.push(RootUpdatedEvent {
            root,
            block_number: block,
        });
    }

    /// Accept `root` in point queries without changing the current root.
    pub fn mark_valid(&self, root: [u8; 32]) {
        self.lock().valid.insert(root);
    }

    pub fn push_event(&self, root: [u8; 32], block_number: u64) {
        self.lock().events.push(RootUpdatedEvent { root, block_number });
    }

    /// Make every query fail with a transport error.
    pub fn fail_with(&self, message: &str) {
        self.lock().failure = Some(message.to_string());
    }

    pub fn recover(&self) {
        self.lock().failure = None;
    }

    /// Delay every answer by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    /// Number of queries served, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn begin(&self) -> Result<(), LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.lock().failure.clone() {
            Some(message) => Err(LedgerError::Transport(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RootValidity for MemoryLedger {
    async fn is_root_valid(&self, root: [u8; 32]) -> Result<bool, LedgerError> {
        self.begin().await?;
        Ok(self.lock().valid.contains(&root))
    }
}

#[async_trait]
impl RootSource for MemoryLedger {
    async fn current_root(&self) -> Result<[u8; 32], LedgerError> {
        self.begin().await?;
        Ok(self.lock().current)
    }
}

#[async_trait]
impl RootEventLog for MemoryLedger {
    async fn root_updated_events(
        &self,
        root: [u8; 32],
        window: EventWindow,
    ) -> Result<Vec<RootUpdatedEvent>, LedgerError> {
        self.begin().await?;
        Ok(self
            .lock()
            .events
            .iter()
            .filter(|e| e.root == root && window.contains(e.block_number))
            .copied()
            .collect())
    }
}
