use std::sync::Arc;

use chrono::Utc;
use zkgate_core::{ProofType, ZkProof};
use zkgate_groth16::{ArkGroth16, ProofChecker, VerificationKey};
use zkgate_rules::{RuleError, ValidationErrors};

use crate::error::{ConfigError, VerifyError};
use crate::options::{merge_options, VerifyOptions};
use crate::signals;

/// Verifies proofs of one kind against a fixed verification key.
///
/// Cheap to share between tasks: the key and the root verifiers are held
/// behind `Arc`s and verification never mutates the verifier.
#[derive(Clone)]
pub struct Verifier {
    key: Arc<VerificationKey>,
    opts: VerifyOptions,
    checker: Arc<dyn ProofChecker>,
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("n_public", &self.key.n_public())
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl Verifier {
    /// Create a verifier from snarkjs JSON key bytes and default options.
    ///
    /// When the options name a verification key file, the file is read
    /// instead and `key` may be `None`.
    pub fn new(key: Option<Vec<u8>>, options: VerifyOptions) -> Result<Self, ConfigError> {
        Self::with_checker(key, options, Arc::new(ArkGroth16))
    }

    /// Like [`Verifier::new`] with a custom Groth16 backend.
    pub fn with_checker(
        key: Option<Vec<u8>>,
        options: VerifyOptions,
        checker: Arc<dyn ProofChecker>,
    ) -> Result<Self, ConfigError> {
        let opts = merge_options(true, &VerifyOptions::default(), &options);

        let bytes = match (opts.verification_key_file(), key) {
            (Some(path), _) => std::fs::read(path).map_err(|source| ConfigError::ReadKeyFile {
                path: path.to_path_buf(),
                source,
            })?,
            (None, Some(bytes)) if !bytes.is_empty() => bytes,
            (None, _) => return Err(ConfigError::MissingVerificationKey),
        };
        let key = VerificationKey::from_json(&bytes)?;

        tracing::info!(
            proof_type = %opts.proof_type().unwrap_or(ProofType::GlobalPassport),
            n_public = key.n_public(),
            passport_root = opts.passport_root_verifier().map_or("disabled", |v| v.kind()),
            poll_root = opts.poll_root_verifier().map_or("disabled", |v| v.kind()),
            "proof verifier created"
        );

        Ok(Self {
            key: Arc::new(key),
            opts,
            checker,
        })
    }

    /// The defaults every call starts from.
    pub fn options(&self) -> &VerifyOptions {
        &self.opts
    }

    pub fn proof_type(&self) -> ProofType {
        self.opts.proof_type().unwrap_or(ProofType::GlobalPassport)
    }

    /// Validate the public signals, then check the proof itself.
    ///
    /// `overrides` are merged over the defaults for this call only. The
    /// Groth16 check runs only when no signal failed.
    pub async fn verify_proof(
        &self,
        proof: &ZkProof,
        overrides: &VerifyOptions,
    ) -> Result<(), VerifyError> {
        let opts = merge_options(false, &self.opts, overrides);
        signals::validate(&opts, proof, Utc::now()).await?;
        self.check_groth16(proof)
    }

    fn check_groth16(&self, proof: &ZkProof) -> Result<(), VerifyError> {
        let Some(points) = proof.proof.as_ref() else {
            let errors: ValidationErrors =
                [("zk_proof/proof".to_string(), RuleError::Required)].into_iter().collect();
            return Err(VerifyError::Malformed(errors));
        };

        self.checker
            .check(points, &proof.pub_signals, &self.key)
            .map_err(|e| {
                tracing::warn!(error = %e, "groth16 verification failed");
                VerifyError::InvalidProof(e)
            })?;

        tracing::debug!(proof_type = %self.proof_type(), "proof verified");
        Ok(())
    }
}
