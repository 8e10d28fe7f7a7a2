//! Integration test: poll participation proofs with event-scan and cached
//! nullifiers tree root checks.

use std::sync::Arc;
use std::time::Duration;

use zkgate_core::ProofType;
use zkgate_integration_tests::{poll_signals, prove, EVENT_ID};
use zkgate_root::{MemoryLedger, RootVerifier};
use zkgate_rules::RuleError;
use zkgate_verifier::{Verifier, VerifyError, VerifyOptions};

const ROOT: [u8; 32] = [1; 32];
const NEXT_ROOT: [u8; 32] = [2; 32];

fn poll_options(root: RootVerifier) -> VerifyOptions {
    VerifyOptions::new()
        .with_proof_type(ProofType::PollParticipation)
        .with_poll_root_verifier(root)
        .with_participation_event_id("77")
        .with_event_id(EVENT_ID)
}

#[tokio::test]
async fn test_poll_proof_with_event_scan() {
    let ledger = Arc::new(MemoryLedger::with_root(ROOT));
    let root = RootVerifier::event_scan(ledger.clone(), Duration::from_secs(1));

    let fixture = prove(poll_signals(&ROOT, "77"));
    let verifier = Verifier::new(Some(fixture.key_json), poll_options(root)).unwrap();
    verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap();

    // a newer root does not erase the event for the old one
    ledger.set_current_root(NEXT_ROOT);
    verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_poll_unknown_root_and_event() {
    let ledger = Arc::new(MemoryLedger::with_root(NEXT_ROOT));
    let root = RootVerifier::event_scan(ledger, Duration::from_secs(1));

    let fixture = prove(poll_signals(&ROOT, "78"));
    let verifier = Verifier::new(Some(fixture.key_json), poll_options(root)).unwrap();

    let err = verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.get("pub_signals/nullifiers_tree_root"),
        Some(&RuleError::InvalidRoot)
    );
    assert_eq!(
        errors.get("pub_signals/participation_event_id"),
        Some(&RuleError::NotAllowed)
    );
}

#[tokio::test]
async fn test_poll_ledger_outage() {
    let ledger = Arc::new(MemoryLedger::with_root(ROOT));
    ledger.fail_with("rpc unreachable");
    let root = RootVerifier::event_scan(ledger, Duration::from_secs(1));

    let fixture = prove(poll_signals(&ROOT, "77"));
    let verifier = Verifier::new(Some(fixture.key_json), poll_options(root)).unwrap();

    let err = verifier
        .verify_proof(&fixture.proof, &VerifyOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::RootUnavailable(_)));
    assert!(err.to_string().contains("rpc unreachable"));
}

#[tokio::test(start_paused = true)]
async fn test_cached_root_goes_stale_then_refreshes() {
    let ttl = Duration::from_secs(10);
    let ledger = Arc::new(MemoryLedger::with_root(ROOT));
    let root = RootVerifier::cached(ledger.clone(), Duration::from_secs(1), ttl);

    let old = prove(poll_signals(&ROOT, "77"));
    let new = prove(poll_signals(&NEXT_ROOT, "77"));
    let verifier = Verifier::new(Some(old.key_json), poll_options(root)).unwrap();
    let none = VerifyOptions::new();

    verifier.verify_proof(&old.proof, &none).await.unwrap();

    // the ledger moves on halfway through the cache lifetime
    tokio::time::advance(ttl / 2).await;
    ledger.set_current_root(NEXT_ROOT);

    tokio::time::advance(ttl / 2 - Duration::from_millis(1)).await;
    verifier.verify_proof(&old.proof, &none).await.unwrap();
    let err = verifier.verify_proof(&new.proof, &none).await.unwrap_err();
    assert!(err.field_errors().is_some_and(|e| e.contains("pub_signals/nullifiers_tree_root")));

    tokio::time::advance(Duration::from_millis(1)).await;
    let err = verifier.verify_proof(&old.proof, &none).await.unwrap_err();
    assert!(err.field_errors().is_some_and(|e| e.contains("pub_signals/nullifiers_tree_root")));
    assert_eq!(ledger.calls(), 2);
}
