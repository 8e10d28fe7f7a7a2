//! zkgate Core — Proof types, public signal layouts and the big-integer
//! signal encoding shared by every zkgate crate.

pub mod codec;
pub mod error;
pub mod schema;
pub mod types;

pub use codec::{
    decimal_to_bytes32, decode_bytes, decode_text, encode_bytes, is_empty_date, EMPTY_DATE,
};
pub use error::SignalError;
pub use schema::{expected_count, lookup, PubSignals};
pub use types::{ProofData, ProofType, SignalId, ZkProof};
