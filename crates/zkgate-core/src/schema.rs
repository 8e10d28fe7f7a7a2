//! Public signal layouts per proof type.
//!
//! Offsets come from the circuits and are not contiguous: slots that the
//! verifier never reads are simply absent from a layout, but still counted
//! by [`expected_count`].

use crate::types::{ProofType, SignalId};

const GLOBAL_PASSPORT: &[(SignalId, usize)] = &[
    (SignalId::Nullifier, 0),
    (SignalId::BirthDate, 1),
    (SignalId::ExpirationDate, 2),
    (SignalId::Citizenship, 6),
    (SignalId::EventId, 9),
    (SignalId::EventData, 10),
    (SignalId::IdStateRoot, 11),
    (SignalId::Selector, 12),
    (SignalId::TimestampUpperBound, 14),
    (SignalId::IdentityCounterUpperBound, 16),
    (SignalId::BirthDateUpperBound, 18),
    (SignalId::ExpirationDateLowerBound, 19),
];

const GEORGIAN_PASSPORT: &[(SignalId, usize)] = &[
    (SignalId::Nullifier, 0),
    (SignalId::BirthDate, 1),
    (SignalId::ExpirationDate, 2),
    (SignalId::Citizenship, 5),
    (SignalId::PersonalNumberHash, 8),
    (SignalId::DocumentType, 9),
    (SignalId::EventId, 10),
    (SignalId::EventData, 11),
    (SignalId::IdStateRoot, 12),
    (SignalId::Selector, 13),
    (SignalId::CurrentDate, 14),
    (SignalId::TimestampUpperBound, 16),
    (SignalId::IdentityCounterUpperBound, 18),
    (SignalId::BirthDateUpperBound, 20),
    (SignalId::ExpirationDateLowerBound, 21),
];

const POLL_PARTICIPATION: &[(SignalId, usize)] = &[
    (SignalId::Nullifier, 0),
    (SignalId::NullifiersTreeRoot, 1),
    (SignalId::ParticipationEventId, 2),
    (SignalId::EventId, 3),
];

/// Signal layout of a proof type.
pub fn layout(proof_type: ProofType) -> &'static [(SignalId, usize)] {
    match proof_type {
        ProofType::GlobalPassport => GLOBAL_PASSPORT,
        ProofType::GeorgianPassport => GEORGIAN_PASSPORT,
        ProofType::PollParticipation => POLL_PARTICIPATION,
    }
}

/// Number of public signals a proof of this type must carry.
pub fn expected_count(proof_type: ProofType) -> usize {
    match proof_type {
        ProofType::GlobalPassport => 22,
        ProofType::GeorgianPassport => 24,
        ProofType::PollParticipation => 4,
    }
}

/// Position of `id` in the signals of `proof_type`, if the type carries it.
pub fn lookup(proof_type: ProofType, id: SignalId) -> Option<usize> {
    layout(proof_type)
        .iter()
        .find(|(signal, _)| *signal == id)
        .map(|(_, offset)| *offset)
}

/// Named read access to the public signals of one proof.
#[derive(Debug, Clone, Copy)]
pub struct PubSignals<'a> {
    proof_type: ProofType,
    signals: &'a [String],
}

impl<'a> PubSignals<'a> {
    /// Bind a proof's raw signals to the layout of `proof_type`.
    pub fn new(proof_type: ProofType, signals: &'a [String]) -> Self {
        Self {
            proof_type,
            signals,
        }
    }

    /// The proof type whose layout is used.
    pub fn proof_type(&self) -> ProofType {
        self.proof_type
    }

    /// Raw decimal value of a signal.
    ///
    /// Returns an empty string when the proof type has no such signal or the
    /// signal array is too short, so optional fields need no existence checks.
    pub fn get(&self, id: SignalId) -> &'a str {
        lookup(self.proof_type, id)
            .and_then(|i| self.signals.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether the number of signals matches the layout.
    pub fn has_expected_count(&self) -> bool {
        self.signals.len() == expected_count(self.proof_type)
    }
}
