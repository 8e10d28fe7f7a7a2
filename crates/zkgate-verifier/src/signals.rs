//! Structural and public signal validation.

use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use zkgate_core::{
    decode_text, expected_count, is_empty_date, ProofType, PubSignals, SignalId, ZkProof,
};
use zkgate_root::RootVerifier;
use zkgate_rules::{
    either, parse_integer, Check, DateRule, MaxBound, RuleError, ValidationErrors,
};

use crate::error::VerifyError;
use crate::options::VerifyOptions;

const PROOF_FIELD: &str = "zk_proof/proof";
const SIGNALS_FIELD: &str = "zk_proof/pub_signals";
const CHALLENGED_EVENT_ID_FIELD: &str = "pub_signals/challenged_event_id";

/// Run the structural checks, then every configured rule for the proof type.
///
/// `opts` must already be merged with the verifier defaults.
pub async fn validate(
    opts: &VerifyOptions,
    proof: &ZkProof,
    now: DateTime<Utc>,
) -> Result<(), VerifyError> {
    let proof_type = opts.proof_type.unwrap_or(ProofType::GlobalPassport);
    let signals = PubSignals::new(proof_type, &proof.pub_signals);

    check_structure(proof, &signals)
        .into_result()
        .map_err(VerifyError::Malformed)?;

    let errors = match proof_type {
        ProofType::PollParticipation => check_poll(opts, &signals).await?,
        _ => check_passport(opts, &signals, now).await?,
    };

    for (field, error) in errors.iter() {
        tracing::debug!(%proof_type, field, %error, "public signal rejected");
    }
    errors.into_result().map_err(VerifyError::Rejected)
}

fn check_structure(proof: &ZkProof, signals: &PubSignals<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !proof.has_proof_data() {
        errors.insert(PROOF_FIELD, RuleError::Required);
    }

    let expected = expected_count(signals.proof_type());
    if proof.pub_signals.is_empty() {
        errors.insert(SIGNALS_FIELD, RuleError::Required);
    } else if proof.pub_signals.len() != expected {
        errors.insert(
            SIGNALS_FIELD,
            RuleError::InvalidLength {
                expected,
                actual: proof.pub_signals.len(),
            },
        );
    }

    if signals.get(SignalId::Nullifier).is_empty() {
        errors.insert(SignalId::Nullifier.path(), RuleError::Required);
    }
    errors
}

/// Check a root. An invalid root becomes a field failure; any other
/// outcome aborts validation.
async fn check_root(
    verifier: Option<&RootVerifier>,
    root: &str,
) -> Result<Result<(), RuleError>, VerifyError> {
    let Some(verifier) = verifier else {
        return Ok(Ok(()));
    };
    match verifier.verify_root(root).await {
        Ok(()) => Ok(Ok(())),
        Err(e) if e.is_invalid_root() => Ok(Err(RuleError::InvalidRoot)),
        Err(e) => {
            tracing::warn!(kind = verifier.kind(), error = %e, "root check aborted");
            Err(VerifyError::RootUnavailable(e))
        }
    }
}

fn equals(value: &str, expected: &str) -> Result<(), RuleError> {
    if value.is_empty() {
        Err(RuleError::Required)
    } else if value == expected {
        Ok(())
    } else {
        Err(RuleError::NotAllowed)
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

async fn check_passport(
    opts: &VerifyOptions,
    signals: &PubSignals<'_>,
    now: DateTime<Utc>,
) -> Result<ValidationErrors, VerifyError> {
    let mut errors = ValidationErrors::new();

    let root_signal = signals.get(SignalId::IdStateRoot);
    let root = check_root(opts.passport_root.as_ref(), root_signal).await?;
    errors.check(SignalId::IdStateRoot.path(), root);

    if signals.proof_type() == ProofType::GeorgianPassport {
        let today = start_of_day(now);
        let yesterday = today - Duration::days(1);
        let tomorrow = today + Duration::days(1);

        let current = signals.get(SignalId::CurrentDate);
        errors.check(
            SignalId::CurrentDate.path(),
            DateRule::after(yesterday)
                .validate(current)
                .and_then(|()| DateRule::before(tomorrow).validate(current)),
        );

        if signals.get(SignalId::PersonalNumberHash).is_empty() {
            errors.insert(SignalId::PersonalNumberHash.path(), RuleError::Required);
        }
    }

    if let Some(selector) = &opts.selector {
        errors.check(SignalId::Selector.path(), equals(signals.get(SignalId::Selector), selector));
    }
    if let Some(event_id) = &opts.event_id {
        errors.check(SignalId::EventId.path(), equals(signals.get(SignalId::EventId), event_id));
    }
    if let Some(citizenships) = &opts.citizenships {
        let citizenship = decode_text(signals.get(SignalId::Citizenship));
        errors.check(SignalId::Citizenship.path(), citizenships.validate(&citizenship));
    }
    if let Some(rule) = &opts.event_data {
        errors.check(SignalId::EventData.path(), rule.validate(signals.get(SignalId::EventData)));
    }
    if let Some(document_type) = &opts.document_type {
        let decoded = decode_text(signals.get(SignalId::DocumentType));
        errors.check(SignalId::DocumentType.path(), equals(&decoded, document_type));
    }

    errors.extend(check_birth_date(opts, signals, now));
    if !opts.skips_expiration_check() {
        errors.extend(check_expiration(signals, now));
    }
    errors.extend(check_identities(opts, signals));

    Ok(errors)
}

/// Old enough when the birth date is before the cutoff, or when the proof
/// was generated with the cutoff itself as birth date upper bound.
fn check_birth_date(
    opts: &VerifyOptions,
    signals: &PubSignals<'_>,
    now: DateTime<Utc>,
) -> ValidationErrors {
    let Some(years) = opts.age_above else {
        return ValidationErrors::new();
    };
    let cutoff = now
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    either(
        Check::ran(
            SignalId::BirthDate.path(),
            DateRule::before(cutoff).validate(signals.get(SignalId::BirthDate)),
        ),
        Check::ran(
            SignalId::BirthDateUpperBound.path(),
            DateRule::same_day(cutoff).validate(signals.get(SignalId::BirthDateUpperBound)),
        ),
    )
}

fn check_expiration(signals: &PubSignals<'_>, now: DateTime<Utc>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let lower_bound = signals.get(SignalId::ExpirationDateLowerBound);
    if !is_empty_date(lower_bound) {
        errors.check(
            SignalId::ExpirationDateLowerBound.path(),
            DateRule::same_day(now).validate(lower_bound),
        );
    }

    let expiration = signals.get(SignalId::ExpirationDate);
    if !is_empty_date(expiration) {
        errors.check(
            SignalId::ExpirationDate.path(),
            DateRule::after(now).validate(expiration),
        );
    }
    errors
}

/// Either the identity counter or the identity creation time must be
/// within bounds.
fn check_identities(opts: &VerifyOptions, signals: &PubSignals<'_>) -> ValidationErrors {
    let counter = signals.get(SignalId::IdentityCounterUpperBound);
    let timestamp = signals.get(SignalId::TimestampUpperBound);

    either(
        Check::when(
            SignalId::IdentityCounterUpperBound.path(),
            opts.max_identities_count,
            |max| MaxBound::new(max).validate(&parse_integer(counter)?),
        ),
        Check::when(
            SignalId::TimestampUpperBound.path(),
            opts.max_identity_creation,
            |max| {
                let seconds = parse_integer(timestamp)?;
                let created = DateTime::from_timestamp(seconds, 0)
                    .ok_or_else(|| RuleError::InvalidInteger(format!("{seconds} is out of range")))?;
                MaxBound::new(max).validate(&created)
            },
        ),
    )
}

async fn check_poll(
    opts: &VerifyOptions,
    signals: &PubSignals<'_>,
) -> Result<ValidationErrors, VerifyError> {
    let mut errors = ValidationErrors::new();

    let root_signal = signals.get(SignalId::NullifiersTreeRoot);
    let root = check_root(opts.poll_root.as_ref(), root_signal).await?;
    errors.check(SignalId::NullifiersTreeRoot.path(), root);

    if let Some(expected) = &opts.participation_event_id {
        errors.check(
            SignalId::ParticipationEventId.path(),
            equals(signals.get(SignalId::ParticipationEventId), expected),
        );
    }
    if let Some(expected) = &opts.event_id {
        errors.check(
            CHALLENGED_EVENT_ID_FIELD,
            equals(signals.get(SignalId::EventId), expected),
        );
    }
    Ok(errors)
}
