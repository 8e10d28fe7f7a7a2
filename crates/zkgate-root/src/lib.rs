//! zkgate Root — Checks a root taken from proof signals against the ledger
//! that is authoritative for it.
//!
//! Four verifiers share one contract, [`RootVerifier::verify_root`]:
//! - disabled: accepts everything
//! - direct: asks the ledger whether the root is valid
//! - cached: compares with the ledger's current root, refetched after a TTL
//! - event scan: looks for a `RootUpdated` event carrying the root
//!
//! Every ledger round trip is bounded by the verifier's request timeout.

pub mod cached;
pub mod config;
pub mod direct;
pub mod error;
pub mod event_scan;
pub mod ledger;
pub mod memory;
pub mod verifier;

pub use cached::CachedRootVerifier;
pub use config::{RootVerifierConfig, RootVerifierMode};
pub use direct::DirectRootVerifier;
pub use error::{LedgerError, RootConfigError, RootError};
pub use event_scan::EventScanRootVerifier;
pub use ledger::{EventWindow, RootEventLog, RootSource, RootUpdatedEvent, RootValidity};
pub use memory::MemoryLedger;
pub use verifier::RootVerifier;
