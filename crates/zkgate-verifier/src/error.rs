use std::path::PathBuf;

use zkgate_groth16::Groth16Error;
use zkgate_root::RootError;
use zkgate_rules::ValidationErrors;

/// Errors raised while constructing a [`crate::Verifier`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("verification key is required")]
    MissingVerificationKey,

    #[error("failed to read verification key from file {path:?}: {source}")]
    ReadKeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    InvalidVerificationKey(#[from] Groth16Error),
}

/// Why a proof was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The proof is missing parts; no rule was evaluated.
    #[error("malformed proof: {0}")]
    Malformed(ValidationErrors),

    /// One or more public signals failed their rules.
    #[error("{0}")]
    Rejected(ValidationErrors),

    /// A root could not be checked. Says nothing about the proof itself.
    #[error("root verification unavailable: {0}")]
    RootUnavailable(#[source] RootError),

    #[error("/proof: {0}")]
    InvalidProof(#[source] Groth16Error),
}

impl VerifyError {
    /// Per-field failures, for structural and rule errors.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Malformed(errors) | Self::Rejected(errors) => Some(errors),
            _ => None,
        }
    }

    /// Whether the error blames the proof rather than infrastructure.
    pub fn is_proof_error(&self) -> bool {
        !matches!(self, Self::RootUnavailable(_))
    }
}
