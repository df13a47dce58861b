use airdrop_merkle_verify::{bitmap, hash_leaf, verify, MAX_PROOF_LEN};
use anchor_lang::{
    account,
    prelude::{Pubkey, *},
};

use crate::error::ErrorCode;

/// State for the account which distributes tokens.
///
/// Borsh layout after the discriminator:
/// `merkle_root[32] | vault[32] | bump[1] | token_mint[32] | total_supply[16] | bitmap_len[4] | claimed_bitmap[len] | authority[32]`.
#[account]
#[derive(Default, Debug)]
pub struct Distributor {
    /// The 256-bit merkle root.
    pub merkle_root: [u8; 32],
    /// Token Address of the vault
    pub vault: Pubkey,
    /// Bump seed of [Distributor::authority].
    pub bump: u8,
    /// [Mint] of the token to be distributed.
    pub token_mint: Pubkey,
    /// Tokens deposited for the whole recipient list.
    pub total_supply: u128,
    /// Bit `i` is set once index `i` has been claimed.
    pub claimed_bitmap: Vec<u8>,
    /// PDA owning the vault, derived from the merkle root.
    pub authority: Pubkey,
}

/// The token vault as seen by [Distributor::initialize].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultInfo {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl Distributor {
    const FIXED_LEN: usize = 8 + 32 + 32 + 1 + 32 + 16 + 4 + 32;

    /// Account size for a bitmap tracking `max_num_nodes` indices.
    /// Clamped so an oversized request still reaches the instruction's own range check.
    pub fn space(max_num_nodes: u32) -> usize {
        Self::FIXED_LEN + bitmap::bitmap_len(max_num_nodes.min(bitmap::MAX_NUM_NODES))
    }

    /// Number of indices this distributor can track.
    pub fn capacity(&self) -> u64 {
        bitmap::capacity(&self.claimed_bitmap)
    }

    #[allow(clippy::result_large_err)]
    pub fn is_claimed(&self, index: u32) -> Result<bool> {
        bitmap::is_claimed(&self.claimed_bitmap, index)
            .ok_or_else(|| error!(ErrorCode::IndexOutOfRange))
    }

    /// Marks `index` as claimed, failing if it already was.
    #[allow(clippy::result_large_err)]
    pub fn set_claimed(&mut self, index: u32) -> Result<()> {
        let was_claimed = bitmap::set_claimed(&mut self.claimed_bitmap, index)
            .ok_or_else(|| error!(ErrorCode::IndexOutOfRange))?;
        require!(!was_claimed, ErrorCode::AlreadyClaimed);
        Ok(())
    }

    /// Fills a fresh distributor for `merkle_root` with every index unclaimed.
    /// CHECK:
    ///     1. The root is not all zeroes
    ///     2. max_num_nodes is within 1..=MAX_NUM_NODES
    ///     3. The vault holds token_mint and is owned by the derived authority
    ///     4. The vault already holds at least total_supply
    #[allow(clippy::result_large_err)]
    pub fn initialize(
        &mut self,
        merkle_root: [u8; 32],
        total_supply: u128,
        max_num_nodes: u32,
        token_mint: Pubkey,
        authority: Pubkey,
        bump: u8,
        vault: &VaultInfo,
    ) -> Result<()> {
        require!(merkle_root != [0u8; 32], ErrorCode::InvalidMerkleRoot);
        require!(
            max_num_nodes > 0 && max_num_nodes <= bitmap::MAX_NUM_NODES,
            ErrorCode::IndexOutOfRange
        );
        require_keys_eq!(vault.mint, token_mint, ErrorCode::MintMismatch);
        require_keys_eq!(vault.owner, authority, ErrorCode::OwnerMismatch);
        require!(
            u128::from(vault.amount) >= total_supply,
            ErrorCode::InsufficientVaultBalance
        );

        self.merkle_root = merkle_root;
        self.vault = vault.address;
        self.bump = bump;
        self.token_mint = token_mint;
        self.total_supply = total_supply;
        self.claimed_bitmap = vec![0u8; bitmap::bitmap_len(max_num_nodes)];
        self.authority = authority;
        Ok(())
    }

    /// Bookkeeping for a claim of leaf `index`, run before the vault transfer.
    /// The bit is set before the balance check; a failed check reverts the
    /// whole transaction, bit included.
    /// CHECK:
    ///     1. The proof is not longer than any tree can need
    ///     2. The index fits in the claimed bitmap
    ///     3. The leaf (index, claimant, amount) verifies against the root
    ///     4. The index has not been claimed yet
    ///     5. The vault holds at least `amount`
    #[allow(clippy::result_large_err)]
    pub fn process_claim(
        &mut self,
        index: u32,
        amount: u64,
        proof: &[[u8; 32]],
        claimant: &Pubkey,
        vault_amount: u64,
    ) -> Result<()> {
        require!(proof.len() <= MAX_PROOF_LEN, ErrorCode::MalformedInput);
        require!(
            u64::from(index) < self.capacity(),
            ErrorCode::IndexOutOfRange
        );

        let leaf = hash_leaf(index, &claimant.to_bytes(), amount);
        require!(
            verify(proof, self.merkle_root, leaf),
            ErrorCode::InvalidMerkleRoot
        );
        require!(!self.is_claimed(index)?, ErrorCode::AlreadyClaimed);

        self.set_claimed(index)?;
        require!(vault_amount >= amount, ErrorCode::InsufficientVaultBalance);
        Ok(())
    }

    pub fn num_claimed(&self) -> u64 {
        bitmap::claimed_count(&self.claimed_bitmap)
    }

    /// True once every representable index has been claimed.
    pub fn is_exhausted(&self) -> bool {
        self.num_claimed() == self.capacity()
    }
}
