use std::{
    fmt::{Debug, Formatter},
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use airdrop_merkle_tree::{
    airdrop_merkle_tree::AirdropMerkleTree, tree_node::TreeNode,
    utils::get_distributor_authority_pda,
};
use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use http::Request;
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use tower::{
    buffer::BufferLayer, limit::RateLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer,
    ServiceBuilder,
};
use tower_http::{
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, instrument, Span};

use crate::{
    distributor::{
        DistributorError, DistributorRegistry, InMemoryTokenLedger, InitializeArgs, TokenLedger,
    },
    error,
    error::ApiError,
    Result,
};

pub struct RouterState {
    pub distributor_pubkey: Pubkey,
    pub program_id: Pubkey,
    pub mint: Pubkey,
    pub registry: DistributorRegistry,
    pub ledger: Arc<InMemoryTokenLedger>,
    pub tree: IndexMap<Pubkey, TreeNode>,
}

impl Debug for RouterState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterState")
            .field("distributor_pubkey", &self.distributor_pubkey)
            .field("program_id", &self.program_id)
            .field("mint", &self.mint)
            .field("tree", &self.tree.len())
            .finish()
    }
}

impl RouterState {
    /// Funds a vault owned by the root's authority with `vault_balance` tokens and
    /// registers a distributor for `tree` on it.
    pub fn new(
        tree: &AirdropMerkleTree,
        program_id: Pubkey,
        mint: Pubkey,
        total_supply: u128,
        max_num_nodes: u32,
        vault_balance: u64,
    ) -> Result<Self> {
        let ledger = Arc::new(InMemoryTokenLedger::new());
        let (authority, _bump) = get_distributor_authority_pda(&program_id, &tree.merkle_root);
        let token_vault = ledger.create_associated_account(&authority, &mint)?;
        ledger.mint_to(&token_vault, vault_balance)?;

        let registry = DistributorRegistry::new(program_id, ledger.clone());
        let distributor_pubkey = registry.initialize(&InitializeArgs {
            merkle_root: tree.merkle_root,
            total_supply,
            max_num_nodes,
            token_mint: mint,
            token_vault,
        })?;

        Ok(Self {
            distributor_pubkey,
            program_id,
            mint,
            registry,
            ledger,
            tree: tree.convert_to_index_map(),
        })
    }
}

#[instrument]
pub fn get_routes(state: Arc<RouterState>, enable_proof_endpoint: bool) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(error::handle_error))
        .layer(BufferLayer::new(100))
        .layer(RateLimitLayer::new(1000, Duration::from_secs(10)))
        .layer(TimeoutLayer::new(Duration::from_secs(20)))
        .layer(LoadShedLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started {} {}", request.method(), request.uri().path())
                })
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing_core::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/users", get(get_users))
        .route("/distributor", get(get_distributor))
        .route("/status/:user_pubkey", get(get_status))
        .route("/claim", post(claim));

    // proofs are only handed out once the distribution is live
    if enable_proof_endpoint {
        router = router.route("/proof/:user_pubkey", get(get_proof));
    }

    router.layer(middleware).with_state(state)
}

async fn root() -> &'static str {
    "Airdrop Distributor API"
}

#[derive(Serialize, Deserialize, Debug)]
struct Proof {
    pub index: u32,
    pub amount: u64,
    pub proof: Vec<[u8; 32]>,
}

fn get_node<'a>(state: &'a RouterState, user_pubkey: &str) -> Result<(Pubkey, &'a TreeNode)> {
    let user_pubkey = Pubkey::from_str(user_pubkey)?;
    let node = state
        .tree
        .get(&user_pubkey)
        .ok_or(ApiError::UserNotFound(user_pubkey.to_string()))?;
    Ok((user_pubkey, node))
}

/// Retrieve the proof for a given user
#[instrument(skip(state), ret)]
async fn get_proof(
    State(state): State<Arc<RouterState>>,
    Path(user_pubkey): Path<String>,
) -> Result<Json<Proof>> {
    let (user_pubkey, node) = get_node(&state, &user_pubkey)?;

    Ok(Json(Proof {
        index: node.index,
        amount: node.amount(),
        proof: node
            .proof
            .to_owned()
            .ok_or(ApiError::ProofNotFound(user_pubkey.to_string()))?,
    }))
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
enum Status {
    Unclaimed,
    Claimed,
}

#[derive(Serialize, Deserialize, Debug)]
struct ClaimStatus {
    pub status: Status,
    pub index: u32,
    pub amount: u64,
}

#[instrument(skip(state), ret)]
async fn get_status(
    State(state): State<Arc<RouterState>>,
    Path(user_pubkey): Path<String>,
) -> Result<Json<ClaimStatus>> {
    let (_, node) = get_node(&state, &user_pubkey)?;

    let status = if state
        .registry
        .is_claimed(&state.distributor_pubkey, node.index)?
    {
        Status::Claimed
    } else {
        Status::Unclaimed
    };

    Ok(Json(ClaimStatus {
        status,
        index: node.index,
        amount: node.amount(),
    }))
}

#[instrument(skip(state), ret)]
async fn get_users(State(state): State<Arc<RouterState>>) -> Result<Json<Vec<String>>> {
    let users = state.tree.keys().map(|key| key.to_string()).collect();
    Ok(Json(users))
}

#[derive(Serialize, Deserialize, Debug)]
struct Distributor {
    /// Public key of this distributor
    pub pubkey: String,
    /// Program ID this distributor belongs to
    pub program_id: String,
    pub merkle_root: [u8; 32],
    pub token_mint: String,
    pub vault: String,
    /// PDA owning the vault
    pub authority: String,
    /// Deposited supply, as a decimal string since it is a u128.
    pub total_supply: String,
    /// Number of indices the claimed bitmap can track.
    pub max_num_nodes: u64,
    pub num_nodes_claimed: u64,
    /// Every index of the bitmap has been claimed.
    pub exhausted: bool,
    pub vault_balance: u64,
}

#[instrument(skip(state), ret)]
async fn get_distributor(State(state): State<Arc<RouterState>>) -> Result<Json<Distributor>> {
    let d = state.registry.get_distributor(&state.distributor_pubkey)?;
    let vault_balance = state.registry.vault_balance(&state.distributor_pubkey)?;

    Ok(Json(Distributor {
        pubkey: state.distributor_pubkey.to_string(),
        program_id: state.program_id.to_string(),
        merkle_root: d.merkle_root,
        token_mint: d.token_mint.to_string(),
        vault: d.vault.to_string(),
        authority: d.authority.to_string(),
        total_supply: d.total_supply.to_string(),
        max_num_nodes: d.capacity(),
        num_nodes_claimed: d.num_claimed(),
        exhausted: d.is_exhausted(),
        vault_balance,
    }))
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ClaimRequest {
    pub index: u32,
    pub amount: u64,
    /// Base58 wallet of the recipient committed in the leaf.
    pub recipient: String,
    pub proof: Vec<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ClaimResponse {
    pub index: u32,
    pub amount: u64,
    pub recipient: String,
    /// Token account the amount was paid into.
    pub token_account: String,
}

/// Pays out one leaf into the recipient's associated token account, creating it
/// once the claim has passed every check.
#[instrument(skip(state), ret)]
async fn claim(
    State(state): State<Arc<RouterState>>,
    request: std::result::Result<Json<ClaimRequest>, JsonRejection>,
) -> Result<Json<ClaimResponse>> {
    let Json(request) =
        request.map_err(|rejection| DistributorError::MalformedInput(rejection.body_text()))?;
    let recipient = Pubkey::from_str(&request.recipient)?;
    let proof = request
        .proof
        .iter()
        .map(|node| {
            <[u8; 32]>::try_from(node.as_slice()).map_err(|_| {
                DistributorError::MalformedInput(format!(
                    "proof node has {} bytes, expected 32",
                    node.len()
                ))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let (token_account, amount) = state.registry.claim_to_recipient(
        &state.distributor_pubkey,
        request.index,
        request.amount,
        &proof,
        &recipient,
    )?;

    Ok(Json(ClaimResponse {
        index: request.index,
        amount,
        recipient: recipient.to_string(),
        token_account: token_account.to_string(),
    }))
}
