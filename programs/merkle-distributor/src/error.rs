use anchor_lang::error_code;

/// Error codes.
#[error_code]
pub enum ErrorCode {
    #[msg("Invalid Merkle Root")]
    InvalidMerkleRoot,
    #[msg("Already Claimed")]
    AlreadyClaimed,
    #[msg("Index exceeds the claimed bitmap capacity")]
    IndexOutOfRange,
    #[msg("Vault balance is lower than the requested transfer")]
    InsufficientVaultBalance,
    #[msg("Malformed input")]
    MalformedInput,
    #[msg("Token account mint did not match the distributor mint")]
    MintMismatch,
    #[msg("Token account owner did not match intended owner")]
    OwnerMismatch,
}
