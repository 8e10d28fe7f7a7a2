//! Integration test: passport proofs through the full verifier.
//!
//! Proofs are real Groth16 proofs over today's signals, checked with the
//! arkworks backend and root verifiers backed by an in-memory ledger.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use zkgate_core::{encode_bytes, ProofType};
use zkgate_groth16::Groth16Error;
use zkgate_integration_tests::{
    passport_signals, prove, EVENT_ID, ID_STATE_ROOT_BYTES, SELECTOR,
};
use zkgate_root::{MemoryLedger, RootVerifier};
use zkgate_rules::RuleError;
use zkgate_verifier::{Verifier, VerifyError, VerifyOptions};

fn policy() -> VerifyOptions {
    VerifyOptions::new()
        .with_selector(SELECTOR)
        .with_citizenships(["UKR", "POL"])
        .with_age_above(18)
        .with_event_id(EVENT_ID)
        .with_identities_counter(3)
}

// =========================================================================
// Accepted proofs
// =========================================================================

#[tokio::test]
async fn test_valid_passport_proof() {
    let fixture = prove(passport_signals(Utc::now()));
    let verifier = Verifier::new(Some(fixture.key_json), policy()).unwrap();

    verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .expect("proof should verify");
}

#[tokio::test]
async fn test_valid_with_direct_root() {
    let ledger = Arc::new(MemoryLedger::with_root(ID_STATE_ROOT_BYTES));
    let root = RootVerifier::direct(ledger.clone(), Duration::from_secs(1));

    let fixture = prove(passport_signals(Utc::now()));
    let verifier = Verifier::new(
        Some(fixture.key_json),
        policy().with_passport_root_verifier(root),
    )
    .unwrap();

    verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap();
    assert_eq!(ledger.calls(), 1);
}

// =========================================================================
// Rejected proofs
// =========================================================================

#[tokio::test]
async fn test_tampered_signal_fails_groth16() {
    let fixture = prove(passport_signals(Utc::now()));
    let verifier = Verifier::new(Some(fixture.key_json), VerifyOptions::new()).unwrap();

    // swap the citizenship for one the holder does not have
    let mut proof = fixture.proof.clone();
    proof.pub_signals[6] = encode_bytes(b"USA");

    let err = verifier
        .verify_proof(&proof, &VerifyOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::InvalidProof(Groth16Error::Rejected)));
}

#[tokio::test]
async fn test_policy_rejection_lists_every_field() {
    let fixture = prove(passport_signals(Utc::now()));
    let verifier = Verifier::new(Some(fixture.key_json), policy()).unwrap();

    let overrides = VerifyOptions::new()
        .with_citizenships(["USA", "GBR"])
        .with_event_id("1")
        .with_age_above(21);
    let err = verifier
        .verify_proof(&fixture.proof, &overrides)
        .await
        .unwrap_err();

    let errors = err.field_errors().expect("field errors");
    assert_eq!(errors.get("pub_signals/citizenship"), Some(&RuleError::NotAllowed));
    assert_eq!(errors.get("pub_signals/event_id"), Some(&RuleError::NotAllowed));
    assert_eq!(
        errors.get("pub_signals/birth_date_upper_bound"),
        Some(&RuleError::DatesNotEqual)
    );
    assert!(err.is_proof_error());

    // the stored policy is unchanged
    verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_root_is_a_field_error() {
    let ledger = Arc::new(MemoryLedger::with_root([7; 32]));
    let root = RootVerifier::direct(ledger, Duration::from_secs(1));

    let fixture = prove(passport_signals(Utc::now()));
    let verifier = Verifier::new(
        Some(fixture.key_json),
        VerifyOptions::new().with_passport_root_verifier(root),
    )
    .unwrap();

    let err = verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "pub_signals/id_state_root: invalid root");
}

#[tokio::test]
async fn test_ledger_timeout_is_not_a_rejection() {
    let ledger = Arc::new(MemoryLedger::with_root(ID_STATE_ROOT_BYTES));
    ledger.set_delay(Duration::from_millis(200));
    let root = RootVerifier::direct(ledger, Duration::from_millis(20));

    let fixture = prove(passport_signals(Utc::now()));
    let verifier = Verifier::new(
        Some(fixture.key_json),
        VerifyOptions::new().with_passport_root_verifier(root),
    )
    .unwrap();

    let err = verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::RootUnavailable(_)));
    assert!(!err.is_proof_error());
}

#[tokio::test]
async fn test_wrong_proof_type_is_malformed() {
    let fixture = prove(passport_signals(Utc::now()));
    let verifier = Verifier::new(
        Some(fixture.key_json),
        VerifyOptions::new().with_proof_type(ProofType::GeorgianPassport),
    )
    .unwrap();

    let err = verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap_err();
    let VerifyError::Malformed(errors) = err else {
        panic!("expected malformed proof");
    };
    assert_eq!(
        errors.get("zk_proof/pub_signals"),
        Some(&RuleError::InvalidLength {
            expected: 24,
            actual: 22
        })
    );
}
