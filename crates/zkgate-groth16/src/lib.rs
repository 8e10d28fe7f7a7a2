//! zkgate Groth16 — Verification keys, proof points and the pairing check
//! for circom/snarkjs circuits over BN254.

pub mod checker;
pub mod error;
pub mod key;
pub mod point;

pub use checker::{ArkGroth16, ProofChecker};
pub use error::Groth16Error;
pub use key::VerificationKey;
