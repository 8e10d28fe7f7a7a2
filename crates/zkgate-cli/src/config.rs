//! Verification policy file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zkgate_core::ProofType;
use zkgate_root::RootVerifierConfig;
use zkgate_rules::ExpectedAddress;
use zkgate_verifier::VerifyOptions;

/// Full verification policy, usually `zkgate.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Kind of proof the policy accepts.
    #[serde(default = "default_proof_type")]
    pub proof_type: ProofType,

    /// snarkjs verification key (JSON).
    #[serde(default = "default_verification_key")]
    pub verification_key: PathBuf,

    /// Public signal rules.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Identity state root checks for passport proofs.
    #[serde(default)]
    pub passport_root: RootVerifierConfig,

    /// Nullifiers tree root checks for poll proofs.
    #[serde(default)]
    pub poll_root: RootVerifierConfig,
}

/// Public signal rules. Every field is optional and an absent field is not
/// checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_above: Option<u32>,
    /// ISO 3166 alpha-3 codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citizenships: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Expected event data, hex. Ignored when `address` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<String>,
    /// Expected bech32 or `0x` address in the event data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_identities_count: Option<i64>,
    /// RFC 3339 instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_identity_creation: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participation_event_id: Option<String>,
    #[serde(default)]
    pub skip_expiration_check: bool,
}

fn default_proof_type() -> ProofType {
    ProofType::GlobalPassport
}

fn default_verification_key() -> PathBuf {
    PathBuf::from("verification_key.json")
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            proof_type: default_proof_type(),
            verification_key: default_verification_key(),
            policy: PolicyConfig::default(),
            passport_root: RootVerifierConfig::default(),
            poll_root: RootVerifierConfig::default(),
        }
    }
}

impl VerifierConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: VerifierConfig = toml::from_str(&contents)
                .with_context(|| format!("invalid config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl PolicyConfig {
    /// Translate the policy into verifier options. Root verifiers are set
    /// by the caller.
    pub fn to_options(&self) -> anyhow::Result<VerifyOptions> {
        let mut opts = VerifyOptions::new().with_citizenships(self.citizenships.iter().cloned());

        if let Some(years) = self.age_above {
            opts = opts.with_age_above(years);
        }
        if let Some(id) = &self.event_id {
            opts = opts.with_event_id(id.clone());
        }
        if let Some(address) = &self.address {
            let address: ExpectedAddress = address
                .parse()
                .with_context(|| format!("invalid policy address {address}"))?;
            opts = opts.with_address(address);
        } else if let Some(data) = &self.event_data {
            let bytes = hex::decode(data.trim_start_matches("0x"))
                .with_context(|| format!("invalid policy event data {data}"))?;
            opts = opts.with_event_data(bytes);
        }
        if let Some(document_type) = &self.document_type {
            opts = opts.with_document_type(document_type.clone());
        }
        if let Some(selector) = &self.selector {
            opts = opts.with_selector(selector.clone());
        }
        if let Some(max) = self.max_identities_count {
            opts = opts.with_identities_counter(max);
        }
        if let Some(max) = self.max_identity_creation {
            opts = opts.with_identity_creation_limit(max);
        }
        if let Some(id) = &self.participation_event_id {
            opts = opts.with_participation_event_id(id.clone());
        }
        if self.skip_expiration_check {
            opts = opts.with_skip_expiration_check(true);
        }
        Ok(opts)
    }
}
