use async_trait::async_trait;

use crate::error::LedgerError;

/// Point query: is this root currently accepted by the contract.
#[async_trait]
pub trait RootValidity: Send + Sync {
    async fn is_root_valid(&self, root: [u8; 32]) -> Result<bool, LedgerError>;
}

/// The root the contract currently stores.
#[async_trait]
pub trait RootSource: Send + Sync {
    async fn current_root(&self) -> Result<[u8; 32], LedgerError>;
}

/// Historical query over the contract's `RootUpdated` events.
#[async_trait]
pub trait RootEventLog: Send + Sync {
    /// Events within `window` whose root equals `root`.
    async fn root_updated_events(
        &self,
        root: [u8; 32],
        window: EventWindow,
    ) -> Result<Vec<RootUpdatedEvent>, LedgerError>;
}

/// Block range of an event query. `to_block: None` means the latest block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventWindow {
    pub from_block: u64,
    pub to_block: Option<u64>,
}

impl EventWindow {
    pub fn since(from_block: u64) -> Self {
        Self {
            from_block,
            to_block: None,
        }
    }

    pub fn contains(&self, block: u64) -> bool {
        block >= self.from_block && self.to_block.map_or(true, |to| block <= to)
    }
}

/// A `RootUpdated` log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootUpdatedEvent {
    pub root: [u8; 32],
    pub block_number: u64,
}
