use airdrop_merkle_verify::DISTRIBUTOR_AUTHORITY_SEED;
use anchor_lang::{context::Context, prelude::*, Accounts, Key, Result};
use anchor_spl::{
    token,
    token::{Token, TokenAccount},
};

use crate::{
    error::ErrorCode,
    state::{claimed_event::ClaimedEvent, distributor::Distributor},
};

/// [merkle_distributor::claim] accounts.
#[derive(Accounts)]
pub struct Claim<'info> {
    /// The [Distributor].
    #[account(
        mut,
        has_one = vault @ ErrorCode::OwnerMismatch,
        has_one = authority @ ErrorCode::OwnerMismatch,
    )]
    pub distributor: Account<'info, Distributor>,

    /// CHECK: PDA signing for the vault, checked against its seeds.
    #[account(
        seeds = [
            DISTRIBUTOR_AUTHORITY_SEED,
            distributor.merkle_root.as_ref()
        ],
        bump = distributor.bump
    )]
    pub authority: UncheckedAccount<'info>,

    /// Token account containing the tokens to distribute.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Account to send the claimed tokens to. Its owner is the recipient of the leaf.
    #[account(
        mut,
        constraint = to.mint == distributor.token_mint @ ErrorCode::MintMismatch
    )]
    pub to: Account<'info, TokenAccount>,

    /// SPL [Token] program.
    pub token_program: Program<'info, Token>,
}

/// Pays out leaf `index` of the [Distributor].
/// 1. Verifies the leaf built from (index, to.owner, amount) and sets its bit,
///    see [Distributor::process_claim] for the checks
/// 2. Transfers `amount` from the vault, signed by the derived authority
#[allow(clippy::result_large_err)]
pub fn handle_claim(
    ctx: Context<Claim>,
    index: u32,
    amount: u64,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let claimant = ctx.accounts.to.owner;
    let vault_amount = ctx.accounts.vault.amount;

    let distributor = &mut ctx.accounts.distributor;
    distributor.process_claim(index, amount, &proof, &claimant, vault_amount)?;

    let merkle_root = distributor.merkle_root;
    let seeds = [
        DISTRIBUTOR_AUTHORITY_SEED,
        merkle_root.as_ref(),
        &[distributor.bump],
    ];

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        )
        .with_signer(&[&seeds[..]]),
        amount,
    )?;

    // Note: might get truncated, do not rely on
    msg!("Claimed index {} for {}: {} tokens", index, claimant, amount);
    emit!(ClaimedEvent {
        distributor: ctx.accounts.distributor.key(),
        index,
        claimant,
        amount,
    });

    Ok(())
}
