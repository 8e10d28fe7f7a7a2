//! Fixtures shared by the integration tests: signal vectors dated today and
//! real Groth16 proofs over them.

use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
use ark_ff::{BigInteger, PrimeField};
use ark_groth16::Groth16;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError, Variable};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use chrono::{DateTime, Months, Utc};
use zkgate_core::{decode_bytes, encode_bytes, ProofData, ZkProof, EMPTY_DATE};

pub const SELECTOR: &str = "23073";
pub const EVENT_ID: &str =
    "304358862882731539112827930982999386691702727710421481944329166126417129570";
/// Identity state root, `0x1fd232b8...c32417`.
pub const ID_STATE_ROOT: &str =
    "14393086243856018838405247242117964464658357003864077561407424514652280923159";
pub const ID_STATE_ROOT_BYTES: [u8; 32] = [
    0x1f, 0xd2, 0x32, 0xb8, 0x3b, 0x19, 0x27, 0xf2, 0xa8, 0xed, 0xe6, 0x2f, 0xfe, 0x15, 0xc3,
    0x1d, 0x18, 0x78, 0x2d, 0xd5, 0x13, 0xe0, 0x8f, 0x4a, 0xab, 0xea, 0xf2, 0xe8, 0xe4, 0xc3,
    0x24, 0x17,
];
pub const IDENTITY_CREATED_AT: i64 = 1713436478;

/// A date signal, `YYMMDD` packed into an integer.
pub fn date_signal(date: DateTime<Utc>) -> String {
    encode_bytes(date.format("%y%m%d").to_string().as_bytes())
}

/// Signals of a global passport proof generated at `now` by a Ukrainian
/// holder exactly 18 years old with one registered identity.
pub fn passport_signals(now: DateTime<Utc>) -> Vec<String> {
    let mut signals = vec!["0".to_string(); 22];
    let eighteen_years_ago = now.checked_sub_months(Months::new(18 * 12)).unwrap_or(now);

    signals[0] = "7639957125598480790492529006924434106731566948760118579546114507674255247458".into();
    signals[6] = encode_bytes(b"UKR");
    signals[9] = EVENT_ID.into();
    signals[10] = "11318436481061661812577344400351359194387994145300108534310140806143276292370".into();
    signals[11] = ID_STATE_ROOT.into();
    signals[12] = SELECTOR.into();
    signals[14] = IDENTITY_CREATED_AT.to_string();
    signals[16] = "1".into();
    signals[17] = EMPTY_DATE.into();
    signals[18] = date_signal(eighteen_years_ago);
    signals[19] = date_signal(now);
    signals[20] = EMPTY_DATE.into();
    signals
}

/// Signals of a poll participation proof.
pub fn poll_signals(nullifiers_root: &[u8; 32], participation_event_id: &str) -> Vec<String> {
    vec![
        "23073".into(),
        encode_bytes(nullifiers_root),
        participation_event_id.into(),
        EVENT_ID.into(),
    ]
}

/// Circuit exposing its witness as public inputs: `w_i * 1 = x_i`.
#[derive(Clone)]
struct EchoCircuit {
    values: Vec<Option<Fr>>,
}

impl ConstraintSynthesizer<Fr> for EchoCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        for value in self.values {
            let witness = cs.new_witness_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?;
            let input = cs.new_input_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?;
            cs.enforce_constraint(
                ark_relations::lc!() + witness,
                ark_relations::lc!() + Variable::One,
                ark_relations::lc!() + input,
            )?;
        }
        Ok(())
    }
}

fn dec<F: PrimeField>(f: F) -> String {
    encode_bytes(&f.into_bigint().to_bytes_be())
}

fn g1(p: &G1Affine) -> serde_json::Value {
    serde_json::json!([dec(p.x), dec(p.y), "1"])
}

fn g2(p: &G2Affine) -> serde_json::Value {
    serde_json::json!([
        [dec(p.x.c0), dec(p.x.c1)],
        [dec(p.y.c0), dec(p.y.c1)],
        ["1", "0"]
    ])
}

/// A verification key and a matching proof for `signals`, in snarkjs JSON
/// form.
pub struct ProvedSignals {
    pub key_json: Vec<u8>,
    pub proof: ZkProof,
}

/// Run a trusted setup for a circuit with one public input per signal and
/// prove it.
pub fn prove(signals: Vec<String>) -> ProvedSignals {
    let values: Vec<Fr> = signals
        .iter()
        .map(|s| Fr::from_be_bytes_mod_order(&decode_bytes(s).unwrap()))
        .collect();

    // Same seeded StdRng as `ark_std::test_rng`, but typed so it satisfies `CryptoRng`.
    let mut rng = {
        use ark_std::rand::SeedableRng;
        let seed = [
            1, 0, 0, 0, 23, 0, 0, 0, 200, 1, 0, 0, 210, 30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
        ];
        ark_std::rand::rngs::StdRng::from_seed(seed)
    };
    let blank = EchoCircuit {
        values: vec![None; values.len()],
    };
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(blank, &mut rng).unwrap();
    let circuit = EchoCircuit {
        values: values.into_iter().map(Some).collect(),
    };
    let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).unwrap();

    let key = serde_json::json!({
        "protocol": "groth16",
        "curve": "bn128",
        "nPublic": signals.len(),
        "vk_alpha_1": g1(&vk.alpha_g1),
        "vk_beta_2": g2(&vk.beta_g2),
        "vk_gamma_2": g2(&vk.gamma_g2),
        "vk_delta_2": g2(&vk.delta_g2),
        "IC": vk.gamma_abc_g1.iter().map(g1).collect::<Vec<_>>(),
    });

    let points = ProofData {
        a: vec![dec(proof.a.x), dec(proof.a.y), "1".into()],
        b: vec![
            vec![dec(proof.b.x.c0), dec(proof.b.x.c1)],
            vec![dec(proof.b.y.c0), dec(proof.b.y.c1)],
            vec!["1".into(), "0".into()],
        ],
        c: vec![dec(proof.c.x), dec(proof.c.y), "1".into()],
        protocol: "groth16".into(),
    };

    ProvedSignals {
        key_json: key.to_string().into_bytes(),
        proof: ZkProof::new(points, signals),
    }
}
