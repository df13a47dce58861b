use airdrop_merkle_verify::{DISTRIBUTOR_AUTHORITY_SEED, DISTRIBUTOR_SEED};
use anchor_lang::{context::Context, prelude::*, Accounts, Key};
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::state::{
    claimed_event::NewDistributorEvent,
    distributor::{Distributor, VaultInfo},
};

/// Accounts for [merkle_distributor::initialize].
#[derive(Accounts)]
#[instruction(merkle_root: [u8; 32], total_supply: u128, max_num_nodes: u32)]
pub struct Initialize<'info> {
    /// [Distributor], one per merkle root.
    #[account(
        init,
        seeds = [
            DISTRIBUTOR_SEED,
            merkle_root.as_ref()
        ],
        bump,
        space = Distributor::space(max_num_nodes),
        payer = payer
    )]
    pub distributor: Account<'info, Distributor>,

    /// CHECK: PDA signing for the vault, never holds data.
    #[account(
        seeds = [
            DISTRIBUTOR_AUTHORITY_SEED,
            merkle_root.as_ref()
        ],
        bump
    )]
    pub distributor_authority: UncheckedAccount<'info>,

    /// Token vault
    /// Should be created and funded previously
    pub token_vault: Account<'info, TokenAccount>,

    /// The mint to distribute.
    pub token_mint: Account<'info, Mint>,

    /// Pays for the distributor account.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The [System] program.
    pub system_program: Program<'info, System>,

    /// The [Token] program.
    pub token_program: Program<'info, Token>,
}

/// Creates a new [Distributor] with every index unclaimed.
/// See [Distributor::initialize] for the checks.
#[allow(clippy::result_large_err)]
pub fn handle_initialize(
    ctx: Context<Initialize>,
    merkle_root: [u8; 32],
    total_supply: u128,
    max_num_nodes: u32,
) -> Result<()> {
    let token_vault = &ctx.accounts.token_vault;
    let vault = VaultInfo {
        address: token_vault.key(),
        mint: token_vault.mint,
        owner: token_vault.owner,
        amount: token_vault.amount,
    };
    let token_mint = ctx.accounts.token_mint.key();
    let authority = ctx.accounts.distributor_authority.key();
    let bump = ctx.bumps.distributor_authority;

    let distributor = &mut ctx.accounts.distributor;
    distributor.initialize(
        merkle_root,
        total_supply,
        max_num_nodes,
        token_mint,
        authority,
        bump,
        &vault,
    )?;

    // Note: might get truncated, do not rely on
    msg! {
        "New distributor created with mint={}, vault={}, total_supply={}, max_num_nodes={}, authority={}",
            distributor.token_mint,
            distributor.vault,
            distributor.total_supply,
            max_num_nodes,
            distributor.authority,
    };
    emit!(NewDistributorEvent {
        distributor: distributor.key(),
        merkle_root,
        total_supply,
        max_num_nodes,
    });

    Ok(())
}
