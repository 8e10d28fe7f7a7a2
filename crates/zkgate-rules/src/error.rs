/// Reasons a public signal fails a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("cannot be blank")]
    Required,

    #[error("the length must be exactly {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("must be a valid value")]
    NotAllowed,

    #[error("invalid date string: {0}")]
    InvalidDate(String),

    #[error("date is too late")]
    TooLate,

    #[error("date is too early")]
    TooEarly,

    #[error("dates are not equal")]
    DatesNotEqual,

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("must be no greater than {0}")]
    AboveMax(String),

    #[error("event data does not match")]
    EventDataMismatch,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid root")]
    InvalidRoot,
}
