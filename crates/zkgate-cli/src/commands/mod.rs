pub mod init;
pub mod inspect;
pub mod verify;

use std::path::Path;

use zkgate_core::ZkProof;

/// Read a proof given as a file path or as inline JSON.
pub fn read_proof(source: &str) -> anyhow::Result<ZkProof> {
    let json = if Path::new(source).exists() {
        std::fs::read_to_string(source)?
    } else {
        source.to_string()
    };
    serde_json::from_str(&json).map_err(|e| anyhow::anyhow!("invalid proof JSON: {}", e))
}
