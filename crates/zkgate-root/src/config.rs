//! Root verifier configuration.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RootConfigError;
use crate::ledger::{EventWindow, RootEventLog, RootSource, RootValidity};
use crate::verifier::{RootVerifier, DEFAULT_CACHE_EXPIRATION, DEFAULT_REQUEST_TIMEOUT};

/// How a configured verifier reaches the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootVerifierMode {
    /// `isRootValid` call per check.
    #[default]
    Direct,
    /// Current root fetched at most once per cache expiration.
    Cached,
    /// `RootUpdated` event lookup per check.
    EventScan,
}

/// One root verifier section, e.g. `[passport_root]`.
///
/// With `disabled = true` every other field is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootVerifierConfig {
    #[serde(default)]
    pub disabled: bool,
    /// JSON-RPC endpoint of the chain holding the contract.
    #[serde(default)]
    pub rpc: String,
    /// Contract address, `0x` followed by 40 hex digits.
    #[serde(default)]
    pub contract: String,
    #[serde(default)]
    pub mode: RootVerifierMode,
    /// Bound of one ledger call; zero falls back to the default.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Cache lifetime in cached mode; zero falls back to the default.
    #[serde(default = "default_cache_expiration_secs")]
    pub cache_expiration_secs: u64,
    /// First block scanned in event scan mode.
    #[serde(default)]
    pub from_block: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_cache_expiration_secs() -> u64 {
    DEFAULT_CACHE_EXPIRATION.as_secs()
}

impl Default for RootVerifierConfig {
    fn default() -> Self {
        Self {
            disabled: true,
            rpc: String::new(),
            contract: String::new(),
            mode: RootVerifierMode::default(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_expiration_secs: default_cache_expiration_secs(),
            from_block: 0,
        }
    }
}

impl RootVerifierConfig {
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => DEFAULT_REQUEST_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    pub fn cache_expiration(&self) -> Duration {
        match self.cache_expiration_secs {
            0 => DEFAULT_CACHE_EXPIRATION,
            secs => Duration::from_secs(secs),
        }
    }

    /// Check the fields a ledger client needs.
    pub fn validate(&self) -> Result<(), RootConfigError> {
        if self.disabled {
            return Ok(());
        }
        if self.rpc.trim().is_empty() {
            return Err(RootConfigError::MissingRpc);
        }
        if !is_hex_address(&self.contract) {
            return Err(RootConfigError::InvalidContract(self.contract.clone()));
        }
        Ok(())
    }

    /// Build the configured verifier on top of a connected ledger client.
    pub fn build<L>(&self, ledger: Arc<L>) -> Result<RootVerifier, RootConfigError>
    where
        L: RootValidity + RootSource + RootEventLog + 'static,
    {
        self.validate()?;
        Ok(self.connect(ledger))
    }

    /// Like [`RootVerifierConfig::build`], without checking `rpc` and
    /// `contract`. For ledgers that are not reached through them, such as a
    /// [`crate::MemoryLedger`].
    pub fn connect<L>(&self, ledger: Arc<L>) -> RootVerifier
    where
        L: RootValidity + RootSource + RootEventLog + 'static,
    {
        if self.disabled {
            return RootVerifier::disabled();
        }

        let timeout = self.request_timeout();
        let verifier = match self.mode {
            RootVerifierMode::Direct => RootVerifier::direct(ledger, timeout),
            RootVerifierMode::Cached => {
                RootVerifier::cached(ledger, timeout, self.cache_expiration())
            }
            RootVerifierMode::EventScan => {
                let scan = crate::event_scan::EventScanRootVerifier::new(ledger, timeout)
                    .with_window(EventWindow::since(self.from_block));
                RootVerifier::EventScan(scan)
            }
        };

        tracing::info!(
            kind = verifier.kind(),
            contract = %self.contract,
            timeout = ?timeout,
            "root verifier configured"
        );
        verifier
    }
}

fn is_hex_address(s: &str) -> bool {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    digits.len() == 40 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}
