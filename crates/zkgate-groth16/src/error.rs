/// Groth16 verification errors.
#[derive(Debug, thiserror::Error)]
pub enum Groth16Error {
    #[error("invalid verification key: {0}")]
    InvalidKey(String),

    #[error("malformed proof: {0}")]
    MalformedProof(String),

    #[error("invalid public input {index}: {reason}")]
    InvalidPublicInput { index: usize, reason: String },

    #[error("public input count mismatch: key expects {expected}, got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },

    #[error("groth16 verification failed")]
    Rejected,

    #[error("groth16 backend error: {0}")]
    Backend(String),
}
