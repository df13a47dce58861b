mod distributor;
mod error;
mod router;

use std::{fmt::Debug, net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};

use airdrop_merkle_tree::airdrop_merkle_tree::AirdropMerkleTree;
use airdrop_merkle_verify::bitmap::{LEGACY_MAX_NUM_NODES, MAX_NUM_NODES};
use clap::Parser;
use router::RouterState;
use solana_program::pubkey::Pubkey;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use crate::error::ApiError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Bind address for the server
    #[clap(long, env, default_value_t = SocketAddr::from_str("0.0.0.0:7001").unwrap())]
    bind_addr: SocketAddr,

    /// Path of merkle tree
    #[clap(long, env)]
    merkle_tree_path: PathBuf,

    /// Mint address of token in question
    #[clap(long, env)]
    mint: Pubkey,

    /// Program ID used to derive the distributor and vault authority addresses
    #[clap(long, env, default_value_t = merkle_distributor::id())]
    program_id: Pubkey,

    /// Tokens committed to the distributor, defaults to the tree's total claim
    #[clap(long, env)]
    total_supply: Option<u128>,

    /// Indices tracked by the claimed bitmap, defaults to the tree size (at least 16)
    #[clap(long, env)]
    max_num_nodes: Option<u32>,

    /// Initial vault balance, defaults to the tree's total claim
    #[clap(long, env)]
    vault_balance: Option<u64>,

    /// Serve proofs at /proof/:user_pubkey
    #[clap(long, env)]
    enable_proof_endpoint: bool,
}

#[tokio::main]
#[instrument]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("args: {:?}", args);

    let tree = AirdropMerkleTree::new_from_file(&args.merkle_tree_path)?;
    let max_num_nodes = args.max_num_nodes.unwrap_or_else(|| {
        u32::try_from(tree.max_num_nodes)
            .unwrap_or(MAX_NUM_NODES)
            .max(LEGACY_MAX_NUM_NODES)
    });

    let state = Arc::new(RouterState::new(
        &tree,
        args.program_id,
        args.mint,
        args.total_supply
            .unwrap_or_else(|| tree.max_total_claim.into()),
        max_num_nodes,
        args.vault_balance.unwrap_or(tree.max_total_claim),
    )?);

    info!("state: {:?}", state);
    info!("starting server at {}", args.bind_addr);

    let app = router::get_routes(state, args.enable_proof_endpoint);

    axum::Server::bind(&args.bind_addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
