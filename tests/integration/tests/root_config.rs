//! Integration test: root verifiers built from configuration, plugged into
//! a passport verifier.

use std::sync::Arc;

use chrono::Utc;
use zkgate_integration_tests::{passport_signals, prove, ID_STATE_ROOT_BYTES};
use zkgate_root::{MemoryLedger, RootConfigError, RootVerifierConfig};
use zkgate_verifier::{Verifier, VerifyOptions};

fn config(mode: &str) -> RootVerifierConfig {
    toml::from_str(&format!(
        r#"
        rpc = "http://localhost:8545"
        contract = "0x7d8Fa2b6C2B5E0C4E0fA2D4f0B3F8b0B6fCe1F9a"
        mode = "{mode}"
        request_timeout_secs = 2
        "#
    ))
    .unwrap()
}

#[tokio::test]
async fn test_every_mode_accepts_the_current_root() {
    let fixture = prove(passport_signals(Utc::now()));

    for mode in ["direct", "cached", "event_scan"] {
        let ledger = Arc::new(MemoryLedger::with_root(ID_STATE_ROOT_BYTES));
        let root = config(mode).build(ledger.clone()).unwrap();
        assert_eq!(root.kind(), mode);

        let verifier = Verifier::new(
            Some(fixture.key_json.clone()),
            VerifyOptions::new().with_passport_root_verifier(root),
        )
        .unwrap();
        verifier
            .verify_proof(&fixture.proof, &VerifyOptions::new())
            .await
            .unwrap_or_else(|e| panic!("{mode}: {e}"));
        assert_eq!(ledger.calls(), 1, "{mode}");
    }
}

#[tokio::test]
async fn test_every_mode_rejects_an_unknown_root() {
    let fixture = prove(passport_signals(Utc::now()));

    for mode in ["direct", "cached", "event_scan"] {
        let ledger = Arc::new(MemoryLedger::with_root([3; 32]));
        let root = config(mode).build(ledger).unwrap();

        let verifier = Verifier::new(
            Some(fixture.key_json.clone()),
            VerifyOptions::new().with_passport_root_verifier(root),
        )
        .unwrap();
        let err = verifier
            .verify_proof(&fixture.proof, &VerifyOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "pub_signals/id_state_root: invalid root", "{mode}");
    }
}

#[test]
fn test_disabled_section_builds_disabled_verifier() {
    let config: RootVerifierConfig = toml::from_str("disabled = true").unwrap();
    let root = config.build(Arc::new(MemoryLedger::new())).unwrap();
    assert!(root.is_disabled());
}

#[test]
fn test_incomplete_section_is_rejected() {
    let config: RootVerifierConfig = toml::from_str(r#"mode = "cached""#).unwrap();
    let err = config.build(Arc::new(MemoryLedger::new())).unwrap_err();
    assert!(matches!(err, RootConfigError::MissingRpc));
}
