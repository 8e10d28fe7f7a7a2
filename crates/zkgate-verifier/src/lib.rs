//! zkgate Verifier — Verifies passport and poll participation proofs.
//!
//! A [`Verifier`] holds a Groth16 verification key and a set of default
//! [`VerifyOptions`]. Each [`Verifier::verify_proof`] call merges per-call
//! options over the defaults and runs three phases:
//! 1. structure: proof points present, signal count, nullifier
//! 2. public signals: every configured rule, failures collected per field
//! 3. Groth16 pairing check, only when every rule passed

pub mod error;
pub mod options;
pub mod signals;
pub mod verifier;

pub use error::{ConfigError, VerifyError};
pub use options::{merge_options, VerifyOptions};
pub use verifier::Verifier;
