use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, VerifyingKey};
use ark_snark::SNARK;
use serde::Deserialize;

use crate::error::Groth16Error;
use crate::point::{parse_g1, parse_g2};

/// Verification key JSON as exported by `snarkjs zkey export verificationkey`.
#[derive(Debug, Deserialize)]
struct SnarkjsKey {
    #[serde(default)]
    protocol: String,
    #[serde(default)]
    curve: String,
    #[serde(rename = "nPublic")]
    n_public: usize,
    vk_alpha_1: Vec<String>,
    vk_beta_2: Vec<Vec<String>>,
    vk_gamma_2: Vec<Vec<String>>,
    vk_delta_2: Vec<Vec<String>>,
    #[serde(rename = "IC")]
    ic: Vec<Vec<String>>,
}

/// A parsed Groth16 verification key for a BN254 circuit.
#[derive(Debug, Clone)]
pub struct VerificationKey {
    n_public: usize,
    prepared: PreparedVerifyingKey<Bn254>,
}

impl VerificationKey {
    /// Parse snarkjs JSON key bytes. Every point is checked to lie on the
    /// curve, so a key that parses can be used for any number of checks.
    pub fn from_json(bytes: &[u8]) -> Result<Self, Groth16Error> {
        let raw: SnarkjsKey =
            serde_json::from_slice(bytes).map_err(|e| Groth16Error::InvalidKey(e.to_string()))?;

        if !raw.protocol.is_empty() && raw.protocol != "groth16" {
            return Err(Groth16Error::InvalidKey(format!(
                "unsupported protocol {}",
                raw.protocol
            )));
        }
        if !raw.curve.is_empty() && raw.curve != "bn128" {
            return Err(Groth16Error::InvalidKey(format!(
                "unsupported curve {}",
                raw.curve
            )));
        }
        if raw.ic.len() != raw.n_public + 1 {
            return Err(Groth16Error::InvalidKey(format!(
                "IC has {} points for {} public inputs",
                raw.ic.len(),
                raw.n_public
            )));
        }

        let invalid = |field: &str, reason: String| {
            Groth16Error::InvalidKey(format!("{field}: {reason}"))
        };
        let vk = VerifyingKey {
            alpha_g1: parse_g1(&raw.vk_alpha_1).map_err(|e| invalid("vk_alpha_1", e))?,
            beta_g2: parse_g2(&raw.vk_beta_2).map_err(|e| invalid("vk_beta_2", e))?,
            gamma_g2: parse_g2(&raw.vk_gamma_2).map_err(|e| invalid("vk_gamma_2", e))?,
            delta_g2: parse_g2(&raw.vk_delta_2).map_err(|e| invalid("vk_delta_2", e))?,
            gamma_abc_g1: raw
                .ic
                .iter()
                .map(|p| parse_g1(p).map_err(|e| invalid("IC", e)))
                .collect::<Result<_, _>>()?,
        };

        let prepared = <Groth16<Bn254> as SNARK<Fr>>::process_vk(&vk)
            .map_err(|e| Groth16Error::InvalidKey(e.to_string()))?;

        Ok(Self {
            n_public: raw.n_public,
            prepared,
        })
    }

    /// Number of public inputs the circuit declares.
    pub fn n_public(&self) -> usize {
        self.n_public
    }

    pub(crate) fn prepared(&self) -> &PreparedVerifyingKey<Bn254> {
        &self.prepared
    }
}
