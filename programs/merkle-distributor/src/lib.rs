//! A program for distributing tokens via a [Merkle root](https://en.wikipedia.org/wiki/Merkle_tree).
//!
//! The recipient list is frozen off-chain into a tree whose leaves are
//! `keccak256(index || recipient || amount)`. Only the root is stored on-chain,
//! together with a bitmap holding one bit per leaf index. A claim presents the
//! index, the amount and the sibling hashes; the program rebuilds the root, flips
//! the bit and pays out of a vault owned by a PDA derived from the root.
//!
//! # Rationale
//!
//! Sending tokens to every wallet costs one transaction per recipient and
//! whoever runs the airdrop pays for all of them. With a Merkle distributor the
//! operator uploads 32 bytes and each recipient pays for their own claim.

#![allow(unexpected_cfgs)]
#![allow(clippy::too_many_arguments)]
use anchor_lang::prelude::*;
use instructions::*;

pub mod error;
pub mod instructions;
pub mod state;

declare_id!("5zp47zmoPwVa55PXtP5kr7URsNRMUqnhiPLLnyo5M9AQ");

#[program]
pub mod merkle_distributor {
    use super::*;

    /// Creates the distributor for `merkle_root`.
    ///
    /// The vault must already exist, be owned by the PDA `["distributor", merkle_root]`
    /// and hold at least `total_supply` tokens. `max_num_nodes` sizes the claimed
    /// bitmap and must cover every leaf of the tree.
    #[allow(clippy::result_large_err)]
    pub fn initialize(
        ctx: Context<Initialize>,
        merkle_root: [u8; 32],
        total_supply: u128,
        max_num_nodes: u32,
    ) -> Result<()> {
        handle_initialize(ctx, merkle_root, total_supply, max_num_nodes)
    }

    /// Anyone holding a valid proof can submit the claim, tokens always go to
    /// the token account owned by the recipient encoded in the leaf.
    #[allow(clippy::result_large_err)]
    pub fn claim(ctx: Context<Claim>, index: u32, amount: u64, proof: Vec<[u8; 32]>) -> Result<()> {
        handle_claim(ctx, index, amount, proof)
    }
}
