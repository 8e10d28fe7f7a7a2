use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof};
use ark_snark::SNARK;
use zkgate_core::ProofData;

use crate::error::Groth16Error;
use crate::key::VerificationKey;
use crate::point::{parse_field, parse_g1, parse_g2};

/// Checks a Groth16 proof against its public signals.
///
/// Implementations must be pure: the same proof, signals and key always
/// give the same answer.
pub trait ProofChecker: Send + Sync {
    fn check(
        &self,
        proof: &ProofData,
        pub_signals: &[String],
        key: &VerificationKey,
    ) -> Result<(), Groth16Error>;
}

/// Pairing check over BN254 with arkworks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArkGroth16;

impl ArkGroth16 {
    fn parse_proof(proof: &ProofData) -> Result<Proof<Bn254>, Groth16Error> {
        let malformed = |field: &str, reason: String| {
            Groth16Error::MalformedProof(format!("{field}: {reason}"))
        };
        Ok(Proof {
            a: parse_g1(&proof.a).map_err(|e| malformed("pi_a", e))?,
            b: parse_g2(&proof.b).map_err(|e| malformed("pi_b", e))?,
            c: parse_g1(&proof.c).map_err(|e| malformed("pi_c", e))?,
        })
    }

    fn parse_inputs(pub_signals: &[String]) -> Result<Vec<Fr>, Groth16Error> {
        pub_signals
            .iter()
            .enumerate()
            .map(|(index, signal)| {
                parse_field::<Fr>(signal)
                    .map_err(|reason| Groth16Error::InvalidPublicInput { index, reason })
            })
            .collect()
    }
}

impl ProofChecker for ArkGroth16 {
    fn check(
        &self,
        proof: &ProofData,
        pub_signals: &[String],
        key: &VerificationKey,
    ) -> Result<(), Groth16Error> {
        if !proof.protocol.is_empty() && proof.protocol != "groth16" {
            return Err(Groth16Error::MalformedProof(format!(
                "unsupported protocol {}",
                proof.protocol
            )));
        }
        if pub_signals.len() != key.n_public() {
            return Err(Groth16Error::InputCountMismatch {
                expected: key.n_public(),
                actual: pub_signals.len(),
            });
        }

        let parsed = Self::parse_proof(proof)?;
        let inputs = Self::parse_inputs(pub_signals)?;

        let valid = <Groth16<Bn254> as SNARK<Fr>>::verify_with_processed_vk(
            key.prepared(),
            &inputs,
            &parsed,
        )
        .map_err(|e| Groth16Error::Backend(e.to_string()))?;

        tracing::debug!(inputs = inputs.len(), valid, "groth16 pairing check");
        if valid {
            Ok(())
        } else {
            Err(Groth16Error::Rejected)
        }
    }
}
