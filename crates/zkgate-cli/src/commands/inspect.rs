//! `zkgate inspect` — Decode the public signals of a proof.

use clap::Args;
use serde::Serialize;

use zkgate_core::schema::layout;
use zkgate_core::{
    decimal_to_bytes32, decode_bytes, decode_text, expected_count, is_empty_date, ProofType,
    PubSignals, SignalId,
};
use zkgate_rules::{parse_integer, parse_signal_date};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Proof JSON (as string or path to file).
    #[arg(short, long)]
    pub proof: String,

    /// Proof type whose signal layout applies.
    #[arg(long, default_value = "global_passport")]
    pub proof_type: ProofType,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SignalRow {
    name: &'static str,
    index: usize,
    raw: String,
    decoded: String,
}

/// Human-readable form of a signal value.
fn decode_signal(id: SignalId, raw: &str) -> String {
    match id {
        SignalId::BirthDate
        | SignalId::ExpirationDate
        | SignalId::BirthDateUpperBound
        | SignalId::ExpirationDateLowerBound
        | SignalId::CurrentDate => {
            if is_empty_date(raw) {
                return "(unused)".into();
            }
            match parse_signal_date(raw) {
                Ok(date) => date.format("%Y-%m-%d").to_string(),
                Err(e) => format!("({})", e),
            }
        }
        SignalId::Citizenship | SignalId::DocumentType => decode_text(raw),
        SignalId::IdStateRoot | SignalId::NullifiersTreeRoot => match decimal_to_bytes32(raw) {
            Ok(root) => format!("0x{}", hex::encode(root)),
            Err(e) => format!("({})", e),
        },
        SignalId::EventData => match decode_bytes(raw) {
            Ok(bytes) => format!("0x{}", hex::encode(bytes)),
            Err(e) => format!("({})", e),
        },
        SignalId::TimestampUpperBound => match parse_integer(raw)
            .ok()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        {
            Some(time) => time.to_rfc3339(),
            None => "(invalid timestamp)".into(),
        },
        _ => raw.to_string(),
    }
}

fn rows(proof_type: ProofType, signals: &[String]) -> Vec<SignalRow> {
    let accessor = PubSignals::new(proof_type, signals);
    let mut rows: Vec<SignalRow> = layout(proof_type)
        .iter()
        .map(|&(id, index)| {
            let raw = accessor.get(id);
            SignalRow {
                name: id.name(),
                index,
                raw: raw.to_string(),
                decoded: decode_signal(id, raw),
            }
        })
        .collect();
    rows.sort_by_key(|r| r.index);
    rows
}

pub fn run(args: &InspectArgs) -> anyhow::Result<()> {
    let proof = super::read_proof(&args.proof)?;

    let expected = expected_count(args.proof_type);
    if proof.pub_signals.len() != expected {
        tracing::warn!(
            expected,
            actual = proof.pub_signals.len(),
            proof_type = %args.proof_type,
            "signal count does not match the proof type"
        );
    }

    let rows = rows(args.proof_type, &proof.pub_signals);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{} proof, {} public signals", args.proof_type, proof.pub_signals.len());
    println!();
    for row in &rows {
        println!("  {:>2} {:<30} {}", row.index, row.name, row.decoded);
    }
    Ok(())
}
