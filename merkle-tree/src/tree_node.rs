use std::str::FromStr;

use airdrop_merkle_verify::hash_leaf;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{error::MerkleTreeError, recipient_entry::RecipientEntry};

/// Represents the claim information for one entry of the recipient list.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Position in the canonical recipient list, also the claimed-bitmap bit
    pub index: u32,
    /// Pubkey of the claimant; owner of the token account receiving the claim
    pub claimant: Pubkey,
    /// Amount that claimant can claim, in base units
    pub amount: u64,
    /// Claimant's proof of inclusion in the Merkle Tree
    pub proof: Option<Vec<[u8; 32]>>,
}

impl TreeNode {
    pub fn hash(&self) -> [u8; 32] {
        hash_leaf(self.index, &self.claimant.to_bytes(), self.amount)
    }

    /// Return amount for this claimant
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Builds the node for the recipient at `index`, scaling a ui amount by `decimals`.
    pub fn from_entry(
        index: u32,
        entry: &RecipientEntry,
        decimals: u32,
    ) -> Result<Self, MerkleTreeError> {
        let claimant = Pubkey::from_str(entry.address.trim())?;
        let amount = ui_amount_to_token_amount(entry.amount, decimals)
            .ok_or_else(|| MerkleTreeError::AmountOverflow(entry.address.clone()))?;

        Ok(Self {
            index,
            claimant,
            amount,
            proof: None,
        })
    }
}

/// Converts a ui amount to a token amount (with decimals)
pub fn ui_amount_to_token_amount(amount: u64, decimals: u32) -> Option<u64> {
    amount.checked_mul(10u64.checked_pow(decimals)?)
}
