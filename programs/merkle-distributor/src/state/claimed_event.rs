use anchor_lang::{event, prelude::*};

/// Emitted when a new distributor is created.
#[event]
pub struct NewDistributorEvent {
    /// The distributor account.
    pub distributor: Pubkey,
    /// The 256-bit merkle root.
    pub merkle_root: [u8; 32],
    /// Total supply committed by the tree.
    pub total_supply: u128,
    /// Number of claimable indices.
    pub max_num_nodes: u32,
}

/// Emitted when tokens are claimed.
#[event]
pub struct ClaimedEvent {
    /// The distributor the claim was made against.
    pub distributor: Pubkey,
    /// Leaf index that was claimed.
    pub index: u32,
    /// Owner of the receiving token account.
    pub claimant: Pubkey,
    /// Amount of tokens distributed.
    pub amount: u64,
}
