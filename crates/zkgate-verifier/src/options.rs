//! Verification options.
//!
//! Every field starts unset, and an unset field skips its rule. Options are
//! built by chaining `with_*` calls, each returning the updated value:
//!
//! ```
//! use zkgate_verifier::VerifyOptions;
//!
//! let opts = VerifyOptions::new()
//!     .with_age_above(18)
//!     .with_citizenships(["UKR", "POL"])
//!     .with_selector("23073");
//! assert_eq!(opts.age_above(), Some(18));
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use zkgate_core::ProofType;
use zkgate_root::RootVerifier;
use zkgate_rules::{EventDataRule, ExpectedAddress, Membership};

#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub(crate) age_above: Option<u32>,
    pub(crate) citizenships: Option<Membership>,
    pub(crate) event_id: Option<String>,
    pub(crate) event_data: Option<EventDataRule>,
    pub(crate) document_type: Option<String>,
    pub(crate) selector: Option<String>,
    pub(crate) max_identities_count: Option<i64>,
    pub(crate) max_identity_creation: Option<DateTime<Utc>>,
    pub(crate) passport_root: Option<RootVerifier>,
    pub(crate) poll_root: Option<RootVerifier>,
    pub(crate) proof_type: Option<ProofType>,
    pub(crate) participation_event_id: Option<String>,
    pub(crate) verification_key_file: Option<PathBuf>,
    pub(crate) skip_expiration_check: Option<bool>,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the holder to be at least `years` old at verification time.
    pub fn with_age_above(mut self, years: u32) -> Self {
        self.age_above = Some(years);
        self
    }

    /// Accept only these ISO 3166 alpha-3 citizenship codes. An empty list
    /// leaves the option unset.
    pub fn with_citizenships<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Membership::new(codes);
        self.citizenships = (!set.is_empty()).then_some(set);
        self
    }

    /// Expected event identifier, a decimal big integer.
    pub fn with_event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }

    /// Expected raw event data bytes.
    pub fn with_event_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.event_data = Some(EventDataRule::Bytes(data.into()));
        self
    }

    /// Expected account address bound into the event data.
    pub fn with_address(mut self, address: ExpectedAddress) -> Self {
        self.event_data = Some(EventDataRule::Address(address));
        self
    }

    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// Expected selector: the bit mask of revealed passport fields.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Maximum number of identities registered with the same passport.
    pub fn with_identities_counter(mut self, max: i64) -> Self {
        self.max_identities_count = Some(max);
        self
    }

    /// Latest accepted creation time of the holder's identity.
    pub fn with_identity_creation_limit(mut self, max: DateTime<Utc>) -> Self {
        self.max_identity_creation = Some(max);
        self
    }

    /// Root verifier for the identity state root of passport proofs.
    pub fn with_passport_root_verifier(mut self, verifier: RootVerifier) -> Self {
        self.passport_root = Some(verifier);
        self
    }

    /// Root verifier for the nullifiers tree root of poll proofs.
    pub fn with_poll_root_verifier(mut self, verifier: RootVerifier) -> Self {
        self.poll_root = Some(verifier);
        self
    }

    pub fn with_proof_type(mut self, proof_type: ProofType) -> Self {
        self.proof_type = Some(proof_type);
        self
    }

    pub fn with_participation_event_id(mut self, id: impl Into<String>) -> Self {
        self.participation_event_id = Some(id.into());
        self
    }

    /// Read the verification key from this file at construction. Ignored
    /// when passed to [`crate::Verifier::verify_proof`].
    pub fn with_verification_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.verification_key_file = Some(path.into());
        self
    }

    /// Skip the document expiration rules.
    pub fn with_skip_expiration_check(mut self, skip: bool) -> Self {
        self.skip_expiration_check = Some(skip);
        self
    }

    pub fn age_above(&self) -> Option<u32> {
        self.age_above
    }

    pub fn proof_type(&self) -> Option<ProofType> {
        self.proof_type
    }

    pub fn verification_key_file(&self) -> Option<&Path> {
        self.verification_key_file.as_deref()
    }

    pub fn passport_root_verifier(&self) -> Option<&RootVerifier> {
        self.passport_root.as_ref()
    }

    pub fn poll_root_verifier(&self) -> Option<&RootVerifier> {
        self.poll_root.as_ref()
    }

    pub fn skips_expiration_check(&self) -> bool {
        self.skip_expiration_check.unwrap_or(false)
    }
}

/// Overlay `overrides` on `base`: set fields of `overrides` win, unset ones
/// fall back to `base`. Neither input is modified.
///
/// With `apply_defaults`, fields still unset afterwards receive their
/// defaults: a global passport proof type and disabled root verifiers.
pub fn merge_options(
    apply_defaults: bool,
    base: &VerifyOptions,
    overrides: &VerifyOptions,
) -> VerifyOptions {
    fn pick<T: Clone>(over: &Option<T>, base: &Option<T>) -> Option<T> {
        over.as_ref().or(base.as_ref()).cloned()
    }

    let mut merged = VerifyOptions {
        age_above: pick(&overrides.age_above, &base.age_above),
        citizenships: pick(&overrides.citizenships, &base.citizenships),
        event_id: pick(&overrides.event_id, &base.event_id),
        event_data: pick(&overrides.event_data, &base.event_data),
        document_type: pick(&overrides.document_type, &base.document_type),
        selector: pick(&overrides.selector, &base.selector),
        max_identities_count: pick(&overrides.max_identities_count, &base.max_identities_count),
        max_identity_creation: pick(&overrides.max_identity_creation, &base.max_identity_creation),
        passport_root: pick(&overrides.passport_root, &base.passport_root),
        poll_root: pick(&overrides.poll_root, &base.poll_root),
        proof_type: pick(&overrides.proof_type, &base.proof_type),
        participation_event_id: pick(
            &overrides.participation_event_id,
            &base.participation_event_id,
        ),
        verification_key_file: pick(
            &overrides.verification_key_file,
            &base.verification_key_file,
        ),
        skip_expiration_check: pick(
            &overrides.skip_expiration_check,
            &base.skip_expiration_check,
        ),
    };

    if apply_defaults {
        merged.proof_type = merged.proof_type.or(Some(ProofType::GlobalPassport));
        merged.passport_root = merged.passport_root.or_else(|| Some(RootVerifier::disabled()));
        merged.poll_root = merged.poll_root.or_else(|| Some(RootVerifier::disabled()));
    }
    merged
}
