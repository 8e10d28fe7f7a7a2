use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SignalError;

/// A family of proofs sharing one fixed public signal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofType {
    /// Passport proof produced by the generic ICAO circuit.
    GlobalPassport,
    /// Georgian ID card proof: carries a personal number hash and the
    /// circuit's notion of the current date.
    GeorgianPassport,
    /// Anonymous poll participation proof.
    PollParticipation,
}

impl ProofType {
    /// All supported proof types.
    pub const ALL: [ProofType; 3] = [
        ProofType::GlobalPassport,
        ProofType::GeorgianPassport,
        ProofType::PollParticipation,
    ];

    /// Stable identifier, used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GlobalPassport => "global_passport",
            Self::GeorgianPassport => "georgian_passport",
            Self::PollParticipation => "poll_participation",
        }
    }

    /// Whether proofs of this type are checked against the passport rules.
    pub fn is_passport(&self) -> bool {
        matches!(self, Self::GlobalPassport | Self::GeorgianPassport)
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProofType {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SignalError::UnknownProofType(s.to_string()))
    }
}

/// Public signal identifiers. These name a signal, they are not indexes:
/// use [`crate::schema::lookup`] to find the position for a proof type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalId {
    Nullifier,
    BirthDate,
    ExpirationDate,
    Citizenship,
    EventId,
    EventData,
    IdStateRoot,
    Selector,
    TimestampUpperBound,
    IdentityCounterUpperBound,
    BirthDateUpperBound,
    ExpirationDateLowerBound,
    PersonalNumberHash,
    DocumentType,
    CurrentDate,
    ParticipationEventId,
    NullifiersTreeRoot,
}

impl SignalId {
    /// Name used in error paths and in `zkgate inspect` output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nullifier => "nullifier",
            Self::BirthDate => "birth_date",
            Self::ExpirationDate => "expiration_date",
            Self::Citizenship => "citizenship",
            Self::EventId => "event_id",
            Self::EventData => "event_data",
            Self::IdStateRoot => "id_state_root",
            Self::Selector => "selector",
            Self::TimestampUpperBound => "timestamp_upper_bound",
            Self::IdentityCounterUpperBound => "identity_counter_upper_bound",
            Self::BirthDateUpperBound => "birth_date_upper_bound",
            Self::ExpirationDateLowerBound => "expiration_date_lower_bound",
            Self::PersonalNumberHash => "personal_number_hash",
            Self::DocumentType => "document_type",
            Self::CurrentDate => "current_date",
            Self::ParticipationEventId => "participation_event_id",
            Self::NullifiersTreeRoot => "nullifiers_tree_root",
        }
    }

    /// Error path of this signal, e.g. `pub_signals/citizenship`.
    pub fn path(&self) -> String {
        format!("pub_signals/{}", self.name())
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Groth16 proof points in the snarkjs JSON layout. Coordinates are decimal
/// strings of projective points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofData {
    #[serde(rename = "pi_a")]
    pub a: Vec<String>,
    #[serde(rename = "pi_b")]
    pub b: Vec<Vec<String>>,
    #[serde(rename = "pi_c")]
    pub c: Vec<String>,
    #[serde(default)]
    pub protocol: String,
}

impl ProofData {
    /// True when none of the proof points were provided.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty() && self.c.is_empty()
    }
}

/// A proof together with its public signals, as produced by the prover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkProof {
    #[serde(default)]
    pub proof: Option<ProofData>,
    #[serde(default)]
    pub pub_signals: Vec<String>,
}

impl ZkProof {
    /// Create a proof from its points and public signals.
    pub fn new(proof: ProofData, pub_signals: Vec<String>) -> Self {
        Self {
            proof: Some(proof),
            pub_signals,
        }
    }

    /// Whether the proof points are present.
    pub fn has_proof_data(&self) -> bool {
        self.proof.as_ref().is_some_and(|p| !p.is_empty())
    }
}
