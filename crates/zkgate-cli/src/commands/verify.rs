//! `zkgate verify` — Verify a proof against a policy.

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use zkgate_core::ProofType;
use zkgate_root::{MemoryLedger, RootVerifier, RootVerifierConfig, RootVerifierMode};
use zkgate_verifier::{Verifier, VerifyError, VerifyOptions};

use crate::config::VerifierConfig;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Proof JSON (as string or path to file).
    #[arg(short, long)]
    pub proof: String,

    /// Path to the policy file.
    #[arg(short, long, default_value = "zkgate.toml")]
    pub config: PathBuf,

    /// Override the verification key path.
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// Override the proof type.
    #[arg(long)]
    pub proof_type: Option<ProofType>,

    /// Identity state root to accept, hex. Repeatable.
    #[arg(long = "passport-root")]
    pub passport_roots: Vec<String>,

    /// Nullifiers tree root to accept, hex. Repeatable.
    #[arg(long = "poll-root")]
    pub poll_roots: Vec<String>,
}

fn parse_root(root: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = hex::decode(root.trim_start_matches("0x"))?;
    if bytes.len() > 32 {
        anyhow::bail!("root is {} bytes, expected at most 32", bytes.len());
    }
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(padded)
}

/// Root verifier for an offline run. The given roots seed an in-memory
/// ledger that answers in the section's configured mode; with no roots the
/// check is disabled.
pub fn offline_root_verifier(
    name: &str,
    roots: &[String],
    config: &RootVerifierConfig,
) -> anyhow::Result<RootVerifier> {
    if roots.is_empty() {
        if !config.disabled {
            anyhow::bail!(
                "{name} root verification against {:?} needs a ledger client; \
                 pass --{name}-root to check offline",
                config.rpc
            );
        }
        return Ok(RootVerifier::disabled());
    }

    let roots = roots
        .iter()
        .map(|root| {
            parse_root(root).map_err(|e| anyhow::anyhow!("invalid {name} root {root}: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let ledger = MemoryLedger::new();
    match config.mode {
        RootVerifierMode::Direct => roots.iter().for_each(|&root| ledger.mark_valid(root)),
        RootVerifierMode::Cached => match roots.as_slice() {
            [root] => ledger.set_current_root(*root),
            _ => anyhow::bail!(
                "{name} root verification in cached mode accepts one current root, got {}",
                roots.len()
            ),
        },
        RootVerifierMode::EventScan => roots
            .iter()
            .for_each(|&root| ledger.push_event(root, config.from_block)),
    }

    let config = RootVerifierConfig {
        disabled: false,
        ..config.clone()
    };
    Ok(config.connect(Arc::new(ledger)))
}

pub async fn run(args: &VerifyArgs) -> anyhow::Result<()> {
    let config = VerifierConfig::load(&args.config)?;
    let proof = super::read_proof(&args.proof)?;

    let proof_type = args.proof_type.unwrap_or(config.proof_type);
    let key_path = args.key.clone().unwrap_or_else(|| config.verification_key.clone());

    let opts = config
        .policy
        .to_options()?
        .with_proof_type(proof_type)
        .with_verification_key_file(&key_path)
        .with_passport_root_verifier(offline_root_verifier(
            "passport",
            &args.passport_roots,
            &config.passport_root,
        )?)
        .with_poll_root_verifier(offline_root_verifier(
            "poll",
            &args.poll_roots,
            &config.poll_root,
        )?);

    let verifier = Verifier::new(None, opts)?;
    match verifier.verify_proof(&proof, &VerifyOptions::new()).await {
        Ok(()) => {
            println!("Proof is VALID ({})", proof_type);
            Ok(())
        }
        Err(VerifyError::RootUnavailable(e)) => {
            anyhow::bail!("could not check root: {}", e)
        }
        Err(e) => {
            println!("Proof is INVALID ({})", proof_type);
            println!();
            match e.field_errors() {
                Some(errors) => {
                    for (field, error) in errors.iter() {
                        println!("  [FAIL] {}: {}", field, error);
                    }
                }
                None => println!("  [FAIL] {}", e),
            }
            anyhow::bail!("proof rejected")
        }
    }
}
