/// Errors raised while interpreting proof types and public signals.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("unknown proof type: {0}")]
    UnknownProofType(String),

    #[error("invalid decimal integer: {0:?}")]
    InvalidDecimal(String),

    #[error("value does not fit into {max} bytes: {actual} bytes")]
    Overflow { max: usize, actual: usize },
}
