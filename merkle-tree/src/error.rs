use solana_program::pubkey::ParsePubkeyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MerkleTreeError {
    #[error("Merkle Tree Validation Error: {0}")]
    MerkleValidationError(String),
    #[error("Merkle Root Error")]
    MerkleRootError,
    #[error("No proof for leaf index {0}")]
    ProofNotFound(usize),
    #[error("Claimant {0} not found in tree")]
    ClaimantNotFound(String),
    #[error("Amount overflow for claimant {0}")]
    AmountOverflow(String),
    #[error("Parse Pubkey Error: {0}")]
    ParsePubkeyError(#[from] ParsePubkeyError),
    #[error("io Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serde Error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
