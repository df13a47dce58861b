extern crate airdrop_merkle_tree;
extern crate merkle_distributor;

mod instructions;

use std::path::{Path, PathBuf};

use airdrop_merkle_tree::{
    airdrop_merkle_tree::AirdropMerkleTree,
    utils::{get_distributor_authority_pda, get_merkle_distributor_pda},
};
use anchor_lang::{prelude::Pubkey, InstructionData, ToAccountMetas};
use anchor_spl::{associated_token::get_associated_token_address, token};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use instructions::*;
use solana_program::instruction::Instruction;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// SPL Mint address
    #[clap(long, env, default_value_t = Pubkey::default())]
    pub mint: Pubkey,

    /// Program id
    #[clap(long, env, default_value_t = merkle_distributor::id())]
    pub program_id: Pubkey,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a Merkle tree, given a JSON list of recipients
    CreateMerkleTree(CreateMerkleTreeArgs),
    /// Check every proof of a tree file against its root
    Verify(VerifyArgs),
    /// Print the leaf and proof of one recipient
    Proof(ProofArgs),
    /// Print the distributor, authority and vault addresses of a tree
    Addresses(AddressesArgs),
    /// Emit the unsigned initialize instruction for a tree
    NewDistributor(NewDistributorArgs),
    /// Emit the unsigned claim instruction for one recipient
    Claim(ClaimArgs),
}

#[derive(Parser, Debug)]
pub struct CreateMerkleTreeArgs {
    /// Recipient list path, a JSON array of {"address", "amount"}
    #[clap(long, env)]
    pub recipients_path: PathBuf,

    /// Merkle tree out path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Mint decimals, amounts in the list are scaled by 10^decimals
    #[clap(long, env, default_value_t = 0)]
    pub decimals: u32,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ProofArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Recipient wallet
    #[clap(long, env)]
    pub claimant: Pubkey,
}

#[derive(Parser, Debug)]
pub struct AddressesArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct NewDistributorArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Account paying for the distributor account
    #[clap(long, env)]
    pub payer: Pubkey,

    /// Funded vault, defaults to the authority's associated token account
    #[clap(long, env)]
    pub token_vault: Option<Pubkey>,

    /// Tokens deposited for the distribution, defaults to the tree's total claim
    #[clap(long, env)]
    pub total_supply: Option<u128>,

    /// Indices tracked by the claimed bitmap, defaults to the tree size (at least 16)
    #[clap(long, env)]
    pub max_num_nodes: Option<u32>,

    /// Where to write the instruction, stdout when absent
    #[clap(long, env)]
    pub out_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ClaimArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Recipient wallet
    #[clap(long, env)]
    pub claimant: Pubkey,

    /// Where to write the instruction, stdout when absent
    #[clap(long, env)]
    pub out_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.command {
        Commands::CreateMerkleTree(merkle_tree_args) => {
            process_create_merkle_tree(merkle_tree_args)
        }
        Commands::Verify(verify_args) => process_verify(verify_args),
        Commands::Proof(proof_args) => process_proof(proof_args),
        Commands::Addresses(addresses_args) => process_addresses(&args, addresses_args),
        Commands::NewDistributor(new_distributor_args) => {
            process_new_distributor(&args, new_distributor_args)
        }
        Commands::Claim(claim_args) => process_claim(&args, claim_args),
    }
}
