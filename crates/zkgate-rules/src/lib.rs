//! zkgate Rules — Predicates over decoded public signals.
//!
//! Provides the checks the verifier runs against proof signals:
//! - Date rules (before, after, same calendar day) over `YYMMDD` signals
//! - Set membership for text-encoded signals (citizenship, document type)
//! - Event data binding to raw bytes or to an account address
//! - Upper bounds for identity counters and creation timestamps
//! - The either combinator for alternative checks
//!
//! Every rule reports failures as [`RuleError`], and failures of a whole
//! proof are collected per field path into [`ValidationErrors`].

pub mod bound;
pub mod date;
pub mod either;
pub mod error;
pub mod event_data;
pub mod membership;
pub mod validation;

pub use bound::{parse_integer, MaxBound};
pub use date::{parse_signal_date, DateRule};
pub use either::{either, Check};
pub use error::RuleError;
pub use event_data::{ExpectedAddress, EventDataRule};
pub use membership::Membership;
pub use validation::ValidationErrors;
