//! `zkgate init` — Write a default verification policy.

use clap::Args;
use std::path::PathBuf;
use zkgate_core::ProofType;

use crate::config::VerifierConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path of the policy file to create.
    #[arg(short, long, default_value = "zkgate.toml")]
    pub config: PathBuf,

    /// Proof type the policy accepts.
    #[arg(long, default_value = "global_passport")]
    pub proof_type: ProofType,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    if args.config.exists() && !args.force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            args.config.display()
        );
    }

    let config = VerifierConfig {
        proof_type: args.proof_type,
        ..Default::default()
    };
    config.save(&args.config)?;
    tracing::info!(path = %args.config.display(), proof_type = %args.proof_type, "wrote default config");

    println!("Wrote {}", args.config.display());
    Ok(())
}
