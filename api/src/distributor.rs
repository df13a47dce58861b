//! Off-chain claim processing.
//!
//! Outside of a ledger nothing serializes writes to a distributor, so every
//! distributor lives behind its own [Mutex] and the whole
//! verify / check / transfer / set sequence runs while holding it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use airdrop_merkle_tree::utils::{get_distributor_authority_pda, get_merkle_distributor_pda};
use airdrop_merkle_verify::{
    bitmap::{self, MAX_NUM_NODES},
    hash_leaf, verify, MAX_PROOF_LEN,
};
use anchor_spl::associated_token::get_associated_token_address;
use merkle_distributor::state::distributor::Distributor;
use solana_program::pubkey::Pubkey;
use thiserror::Error;
use tracing::{info, warn};

pub type Result<T> = std::result::Result<T, DistributorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistributorError {
    #[error("Invalid Merkle Root")]
    InvalidMerkleRoot,
    #[error("Index {0} already claimed")]
    AlreadyClaimed(u32),
    #[error("Index {index} exceeds capacity {capacity}")]
    IndexOutOfRange { index: u32, capacity: u64 },
    #[error("Vault holds {available}, requested {requested}")]
    InsufficientVaultBalance { available: u64, requested: u128 },
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Token account {0} has the wrong mint")]
    MintMismatch(Pubkey),
    #[error("Token account {0} has the wrong owner")]
    OwnerMismatch(Pubkey),
    #[error("Token account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("Distributor {0} not found")]
    DistributorNotFound(Pubkey),
    #[error("Distributor {0} already exists")]
    DistributorExists(Pubkey),
    #[error("Arithmetic Error (overflow/underflow)")]
    ArithmeticError,
    #[error("Lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccount {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Token balances the claim processor pays out of.
pub trait TokenLedger: Send + Sync {
    fn get_account(&self, address: &Pubkey) -> Result<TokenAccount>;

    /// Moves `amount` between two accounts of the same mint. Either both
    /// balances change or neither does.
    fn transfer(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;

    /// Creates the associated token account of `owner` for `mint` if it does not exist yet.
    fn create_associated_account(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey>;
}

#[derive(Debug, Default)]
pub struct InMemoryTokenLedger {
    accounts: Mutex<HashMap<Pubkey, TokenAccount>>,
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint_to(&self, address: &Pubkey, amount: u64) -> Result<()> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| DistributorError::LockPoisoned)?;
        let account = accounts
            .get_mut(address)
            .ok_or(DistributorError::AccountNotFound(*address))?;
        account.amount = account
            .amount
            .checked_add(amount)
            .ok_or(DistributorError::ArithmeticError)?;
        Ok(())
    }
}

impl TokenLedger for InMemoryTokenLedger {
    /// Creates the associated token account of `owner` for `mint` if it does not exist yet.
    fn create_associated_account(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
        let address = get_associated_token_address(owner, mint);
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| DistributorError::LockPoisoned)?;
        accounts.entry(address).or_insert(TokenAccount {
            mint: *mint,
            owner: *owner,
            amount: 0,
        });
        Ok(address)
    }

    fn get_account(&self, address: &Pubkey) -> Result<TokenAccount> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| DistributorError::LockPoisoned)?;
        accounts
            .get(address)
            .copied()
            .ok_or(DistributorError::AccountNotFound(*address))
    }

    fn transfer(&self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| DistributorError::LockPoisoned)?;
        let source = *accounts
            .get(from)
            .ok_or(DistributorError::AccountNotFound(*from))?;
        let destination = *accounts
            .get(to)
            .ok_or(DistributorError::AccountNotFound(*to))?;

        if source.mint != destination.mint {
            return Err(DistributorError::MintMismatch(*to));
        }
        if source.amount < amount {
            return Err(DistributorError::InsufficientVaultBalance {
                available: source.amount,
                requested: amount.into(),
            });
        }
        if from == to {
            return Ok(());
        }

        let new_destination_amount = destination
            .amount
            .checked_add(amount)
            .ok_or(DistributorError::ArithmeticError)?;

        // all checks passed, apply both sides
        if let Some(account) = accounts.get_mut(from) {
            account.amount = source.amount - amount;
        }
        if let Some(account) = accounts.get_mut(to) {
            account.amount = new_destination_amount;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeArgs {
    pub merkle_root: [u8; 32],
    pub total_supply: u128,
    pub max_num_nodes: u32,
    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
}

/// Every distributor known to the service, each guarded by its own lock.
pub struct DistributorRegistry {
    program_id: Pubkey,
    ledger: Arc<dyn TokenLedger>,
    distributors: RwLock<HashMap<Pubkey, Arc<Mutex<Distributor>>>>,
}

impl DistributorRegistry {
    pub fn new(program_id: Pubkey, ledger: Arc<dyn TokenLedger>) -> Self {
        Self {
            program_id,
            ledger,
            distributors: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new distributor for `args.merkle_root` with every index unclaimed.
    /// The vault must already be funded and owned by the root's derived authority.
    pub fn initialize(&self, args: &InitializeArgs) -> Result<Pubkey> {
        if args.merkle_root == [0u8; 32] {
            return Err(DistributorError::InvalidMerkleRoot);
        }
        if args.max_num_nodes == 0 || args.max_num_nodes > MAX_NUM_NODES {
            return Err(DistributorError::IndexOutOfRange {
                index: args.max_num_nodes,
                capacity: MAX_NUM_NODES.into(),
            });
        }

        let (authority, bump) = get_distributor_authority_pda(&self.program_id, &args.merkle_root);
        let vault = self.ledger.get_account(&args.token_vault)?;
        if vault.mint != args.token_mint {
            return Err(DistributorError::MintMismatch(args.token_vault));
        }
        if vault.owner != authority {
            return Err(DistributorError::OwnerMismatch(args.token_vault));
        }
        if u128::from(vault.amount) < args.total_supply {
            return Err(DistributorError::InsufficientVaultBalance {
                available: vault.amount,
                requested: args.total_supply,
            });
        }

        let (address, _bump) = get_merkle_distributor_pda(&self.program_id, &args.merkle_root);
        let distributor = Distributor {
            merkle_root: args.merkle_root,
            vault: args.token_vault,
            bump,
            token_mint: args.token_mint,
            total_supply: args.total_supply,
            claimed_bitmap: vec![0u8; bitmap::bitmap_len(args.max_num_nodes)],
            authority,
        };

        let mut distributors = self
            .distributors
            .write()
            .map_err(|_| DistributorError::LockPoisoned)?;
        if distributors.contains_key(&address) {
            return Err(DistributorError::DistributorExists(address));
        }
        distributors.insert(address, Arc::new(Mutex::new(distributor)));

        info!(
            "new distributor {} mint={} vault={} total_supply={} max_num_nodes={}",
            address, args.token_mint, args.token_vault, args.total_supply, args.max_num_nodes
        );
        Ok(address)
    }

    fn entry(&self, address: &Pubkey) -> Result<Arc<Mutex<Distributor>>> {
        let distributors = self
            .distributors
            .read()
            .map_err(|_| DistributorError::LockPoisoned)?;
        distributors
            .get(address)
            .cloned()
            .ok_or(DistributorError::DistributorNotFound(*address))
    }

    /// Snapshot of the distributor record.
    pub fn get_distributor(&self, address: &Pubkey) -> Result<Distributor> {
        let entry = self.entry(address)?;
        let distributor = entry.lock().map_err(|_| DistributorError::LockPoisoned)?;
        Ok(distributor.clone())
    }

    pub fn is_claimed(&self, address: &Pubkey, index: u32) -> Result<bool> {
        let distributor = self.get_distributor(address)?;
        bitmap::is_claimed(&distributor.claimed_bitmap, index).ok_or(
            DistributorError::IndexOutOfRange {
                index,
                capacity: distributor.capacity(),
            },
        )
    }

    /// Current balance of the distributor's vault.
    pub fn vault_balance(&self, address: &Pubkey) -> Result<u64> {
        let vault = self.get_distributor(address)?.vault;
        Ok(self.ledger.get_account(&vault)?.amount)
    }

    /// Pays out leaf `index` to the existing token account `to`, whose owner
    /// must be the recipient committed in the leaf. Returns the amount transferred.
    ///
    /// Nothing is mutated unless every check passed; the bit is only set after
    /// the transfer went through.
    pub fn claim(
        &self,
        address: &Pubkey,
        index: u32,
        amount: u64,
        proof: &[[u8; 32]],
        to: &Pubkey,
    ) -> Result<u64> {
        let entry = self.entry(address)?;
        let mut distributor = entry.lock().map_err(|_| DistributorError::LockPoisoned)?;

        check_bounds(&distributor, index, proof)?;
        let destination = self.ledger.get_account(to)?;
        if destination.mint != distributor.token_mint {
            return Err(DistributorError::MintMismatch(*to));
        }
        check_leaf(&distributor, address, index, amount, proof, &destination.owner)?;

        self.pay_out(&mut distributor, address, index, amount, to, &destination.owner)?;
        Ok(amount)
    }

    /// Pays out leaf `index` to the associated token account of `recipient`.
    /// The account is only created once the claim is known to succeed.
    /// Returns the token account and the amount transferred.
    pub fn claim_to_recipient(
        &self,
        address: &Pubkey,
        index: u32,
        amount: u64,
        proof: &[[u8; 32]],
        recipient: &Pubkey,
    ) -> Result<(Pubkey, u64)> {
        let entry = self.entry(address)?;
        let mut distributor = entry.lock().map_err(|_| DistributorError::LockPoisoned)?;

        check_bounds(&distributor, index, proof)?;
        check_leaf(&distributor, address, index, amount, proof, recipient)?;

        let available = self.ledger.get_account(&distributor.vault)?.amount;
        if available < amount {
            return Err(DistributorError::InsufficientVaultBalance {
                available,
                requested: amount.into(),
            });
        }

        let to = self
            .ledger
            .create_associated_account(recipient, &distributor.token_mint)?;
        self.pay_out(&mut distributor, address, index, amount, &to, recipient)?;
        Ok((to, amount))
    }

    fn pay_out(
        &self,
        distributor: &mut Distributor,
        address: &Pubkey,
        index: u32,
        amount: u64,
        to: &Pubkey,
        recipient: &Pubkey,
    ) -> Result<()> {
        self.ledger.transfer(&distributor.vault, to, amount)?;
        let was_claimed = bitmap::set_claimed(&mut distributor.claimed_bitmap, index);
        debug_assert_eq!(was_claimed, Some(false), "index {index} checked before payout");

        info!(
            "claimed index {} on distributor {}: {} tokens to {}",
            index, address, amount, recipient
        );
        Ok(())
    }
}

/// Proof length and index range, checked before anything is looked up.
fn check_bounds(distributor: &Distributor, index: u32, proof: &[[u8; 32]]) -> Result<()> {
    if proof.len() > MAX_PROOF_LEN {
        return Err(DistributorError::MalformedInput(format!(
            "proof has {} elements, at most {} allowed",
            proof.len(),
            MAX_PROOF_LEN
        )));
    }
    let capacity = distributor.capacity();
    if u64::from(index) >= capacity {
        return Err(DistributorError::IndexOutOfRange { index, capacity });
    }
    Ok(())
}

/// The leaf verifies against the root and its bit is still clear.
fn check_leaf(
    distributor: &Distributor,
    address: &Pubkey,
    index: u32,
    amount: u64,
    proof: &[[u8; 32]],
    recipient: &Pubkey,
) -> Result<()> {
    let leaf = hash_leaf(index, &recipient.to_bytes(), amount);
    if !verify(proof, distributor.merkle_root, leaf) {
        warn!("invalid proof for index {} on distributor {}", index, address);
        return Err(DistributorError::InvalidMerkleRoot);
    }
    if bitmap::is_claimed(&distributor.claimed_bitmap, index) == Some(true) {
        return Err(DistributorError::AlreadyClaimed(index));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::thread;

    use airdrop_merkle_tree::{airdrop_merkle_tree::AirdropMerkleTree, tree_node::TreeNode};
    use airdrop_merkle_verify::bitmap::LEGACY_MAX_NUM_NODES;

    use super::*;

    struct Fixture {
        ledger: Arc<InMemoryTokenLedger>,
        registry: DistributorRegistry,
        tree: AirdropMerkleTree,
        mint: Pubkey,
        distributor: Pubkey,
    }

    fn setup(amounts: &[u64], vault_balance: u64, max_num_nodes: u32) -> Fixture {
        let tree_nodes = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| TreeNode {
                index: i as u32,
                claimant: Pubkey::new_unique(),
                amount: *amount,
                proof: None,
            })
            .collect();
        let tree = AirdropMerkleTree::new(tree_nodes).unwrap();

        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ledger = Arc::new(InMemoryTokenLedger::new());
        let (authority, _) = get_distributor_authority_pda(&program_id, &tree.merkle_root);
        let vault = ledger.create_associated_account(&authority, &mint).unwrap();
        ledger.mint_to(&vault, vault_balance).unwrap();

        let registry = DistributorRegistry::new(program_id, ledger.clone());
        let distributor = registry
            .initialize(&InitializeArgs {
                merkle_root: tree.merkle_root,
                total_supply: tree.max_total_claim.into(),
                max_num_nodes,
                token_mint: mint,
                token_vault: vault,
            })
            .unwrap();

        Fixture {
            ledger,
            registry,
            tree,
            mint,
            distributor,
        }
    }

    impl Fixture {
        fn claim_node(&self, index: u32) -> Result<u64> {
            let node = self.tree.get_node_by_index(index).unwrap();
            let to = self
                .ledger
                .create_associated_account(&node.claimant, &self.mint)
                .unwrap();
            self.registry.claim(
                &self.distributor,
                node.index,
                node.amount,
                node.proof.as_ref().unwrap(),
                &to,
            )
        }

        fn vault_balance(&self) -> u64 {
            self.registry.vault_balance(&self.distributor).unwrap()
        }
    }

    #[test]
    fn test_two_recipient_scenario() {
        let fixture = setup(&[100, 250], 350, LEGACY_MAX_NUM_NODES);
        assert_eq!(fixture.vault_balance(), 350);

        assert_eq!(fixture.claim_node(0), Ok(100));
        assert_eq!(fixture.vault_balance(), 250);
        assert!(fixture.registry.is_claimed(&fixture.distributor, 0).unwrap());
        assert!(!fixture.registry.is_claimed(&fixture.distributor, 1).unwrap());

        assert_eq!(fixture.claim_node(0), Err(DistributorError::AlreadyClaimed(0)));
        assert_eq!(fixture.vault_balance(), 250);

        assert_eq!(fixture.claim_node(1), Ok(250));
        assert_eq!(fixture.vault_balance(), 0);
        assert!(fixture.registry.is_claimed(&fixture.distributor, 1).unwrap());

        let recipient = fixture.tree.get_node_by_index(1).unwrap().claimant;
        let to = get_associated_token_address(&recipient, &fixture.mint);
        assert_eq!(fixture.ledger.get_account(&to).unwrap().amount, 250);
    }

    #[test]
    fn test_wrong_amount_or_recipient_is_rejected() {
        let fixture = setup(&[100, 250], 350, LEGACY_MAX_NUM_NODES);
        let node = fixture.tree.get_node_by_index(0).unwrap().clone();
        let proof = node.proof.clone().unwrap();
        let to = fixture
            .ledger
            .create_associated_account(&node.claimant, &fixture.mint)
            .unwrap();

        assert_eq!(
            fixture
                .registry
                .claim(&fixture.distributor, 0, 101, &proof, &to),
            Err(DistributorError::InvalidMerkleRoot)
        );
        assert_eq!(
            fixture
                .registry
                .claim(&fixture.distributor, 1, 100, &proof, &to),
            Err(DistributorError::InvalidMerkleRoot)
        );

        let stranger = fixture
            .ledger
            .create_associated_account(&Pubkey::new_unique(), &fixture.mint)
            .unwrap();
        assert_eq!(
            fixture
                .registry
                .claim(&fixture.distributor, 0, 100, &proof, &stranger),
            Err(DistributorError::InvalidMerkleRoot)
        );

        assert_eq!(fixture.vault_balance(), 350);
        assert!(!fixture.registry.is_claimed(&fixture.distributor, 0).unwrap());
    }

    #[test]
    fn test_claim_to_recipient_provisions_only_on_success() {
        let fixture = setup(&[100, 250], 350, LEGACY_MAX_NUM_NODES);
        let node = fixture.tree.get_node_by_index(1).unwrap().clone();
        let proof = node.proof.clone().unwrap();
        let to = get_associated_token_address(&node.claimant, &fixture.mint);

        // rejected attempts leave no account behind
        for _ in 0..10 {
            let stranger = Pubkey::new_unique();
            assert_eq!(
                fixture
                    .registry
                    .claim_to_recipient(&fixture.distributor, 1, 250, &proof, &stranger),
                Err(DistributorError::InvalidMerkleRoot)
            );
            let stranger_to = get_associated_token_address(&stranger, &fixture.mint);
            assert_eq!(
                fixture.ledger.get_account(&stranger_to),
                Err(DistributorError::AccountNotFound(stranger_to))
            );
        }
        assert_eq!(
            fixture
                .registry
                .claim_to_recipient(&fixture.distributor, 16, 250, &proof, &node.claimant),
            Err(DistributorError::IndexOutOfRange {
                index: 16,
                capacity: 16
            })
        );
        assert!(fixture.ledger.get_account(&to).is_err());

        assert_eq!(
            fixture
                .registry
                .claim_to_recipient(&fixture.distributor, 1, 250, &proof, &node.claimant),
            Ok((to, 250))
        );
        assert_eq!(fixture.ledger.get_account(&to).unwrap().amount, 250);
        assert_eq!(
            fixture
                .registry
                .claim_to_recipient(&fixture.distributor, 1, 250, &proof, &node.claimant),
            Err(DistributorError::AlreadyClaimed(1))
        );
        assert_eq!(fixture.vault_balance(), 100);
    }

    #[test]
    fn test_claim_to_recipient_underfunded_vault_creates_nothing() {
        let fixture = setup(&[100, 250], 350, LEGACY_MAX_NUM_NODES);
        let vault = fixture
            .registry
            .get_distributor(&fixture.distributor)
            .unwrap()
            .vault;
        let drain = fixture
            .ledger
            .create_associated_account(&Pubkey::new_unique(), &fixture.mint)
            .unwrap();
        fixture.ledger.transfer(&vault, &drain, 200).unwrap();

        let node = fixture.tree.get_node_by_index(1).unwrap().clone();
        assert_eq!(
            fixture.registry.claim_to_recipient(
                &fixture.distributor,
                1,
                250,
                node.proof.as_ref().unwrap(),
                &node.claimant
            ),
            Err(DistributorError::InsufficientVaultBalance {
                available: 150,
                requested: 250
            })
        );
        let to = get_associated_token_address(&node.claimant, &fixture.mint);
        assert!(fixture.ledger.get_account(&to).is_err());
        assert!(!fixture.registry.is_claimed(&fixture.distributor, 1).unwrap());
    }

    #[test]
    fn test_capacity_boundary() {
        let amounts: Vec<u64> = (1..=17).collect();
        let fixture = setup(&amounts, 1_000, LEGACY_MAX_NUM_NODES);

        assert_eq!(fixture.claim_node(15), Ok(16));
        assert_eq!(
            fixture.claim_node(16),
            Err(DistributorError::IndexOutOfRange {
                index: 16,
                capacity: 16
            })
        );
    }

    #[test]
    fn test_insufficient_vault_balance_leaves_index_unclaimed() {
        let fixture = setup(&[100, 250], 350, LEGACY_MAX_NUM_NODES);
        let vault = fixture
            .registry
            .get_distributor(&fixture.distributor)
            .unwrap()
            .vault;
        let drain = fixture
            .ledger
            .create_associated_account(&Pubkey::new_unique(), &fixture.mint)
            .unwrap();
        fixture.ledger.transfer(&vault, &drain, 300).unwrap();

        assert_eq!(
            fixture.claim_node(0),
            Err(DistributorError::InsufficientVaultBalance {
                available: 50,
                requested: 100
            })
        );
        assert!(!fixture.registry.is_claimed(&fixture.distributor, 0).unwrap());
    }

    #[test]
    fn test_oversized_proof_is_malformed() {
        let fixture = setup(&[100, 250], 350, LEGACY_MAX_NUM_NODES);
        let node = fixture.tree.get_node_by_index(0).unwrap();
        let to = fixture
            .ledger
            .create_associated_account(&node.claimant, &fixture.mint)
            .unwrap();
        let proof = vec![[0u8; 32]; MAX_PROOF_LEN + 1];

        assert!(matches!(
            fixture
                .registry
                .claim(&fixture.distributor, 0, 100, &proof, &to),
            Err(DistributorError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_concurrent_claims_pay_once() {
        let fixture = Arc::new(setup(&[100, 250, 75], 425, LEGACY_MAX_NUM_NODES));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let fixture = fixture.clone();
                thread::spawn(move || fixture.claim_node(1))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| *r == Err(DistributorError::AlreadyClaimed(1))));
        assert_eq!(fixture.vault_balance(), 175);
    }

    #[test]
    fn test_initialize_checks() {
        let fixture = setup(&[100, 250], 350, LEGACY_MAX_NUM_NODES);
        let vault = fixture
            .registry
            .get_distributor(&fixture.distributor)
            .unwrap()
            .vault;
        let args = InitializeArgs {
            merkle_root: fixture.tree.merkle_root,
            total_supply: 350,
            max_num_nodes: LEGACY_MAX_NUM_NODES,
            token_mint: fixture.mint,
            token_vault: vault,
        };

        assert_eq!(
            fixture.registry.initialize(&args),
            Err(DistributorError::DistributorExists(fixture.distributor))
        );
        assert_eq!(
            fixture.registry.initialize(&InitializeArgs {
                merkle_root: [0u8; 32],
                ..args.clone()
            }),
            Err(DistributorError::InvalidMerkleRoot)
        );

        // a vault that is not owned by the authority of this root
        let other_root = [9u8; 32];
        assert_eq!(
            fixture.registry.initialize(&InitializeArgs {
                merkle_root: other_root,
                ..args.clone()
            }),
            Err(DistributorError::OwnerMismatch(vault))
        );
        assert_eq!(
            fixture.registry.initialize(&InitializeArgs {
                token_mint: Pubkey::new_unique(),
                ..args.clone()
            }),
            Err(DistributorError::MintMismatch(vault))
        );
        assert!(matches!(
            fixture.registry.initialize(&InitializeArgs {
                max_num_nodes: 0,
                ..args
            }),
            Err(DistributorError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_initialize_requires_funded_vault() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let merkle_root = [5u8; 32];
        let ledger = Arc::new(InMemoryTokenLedger::new());
        let (authority, _) = get_distributor_authority_pda(&program_id, &merkle_root);
        let vault = ledger.create_associated_account(&authority, &mint).unwrap();
        ledger.mint_to(&vault, 10).unwrap();

        let registry = DistributorRegistry::new(program_id, ledger);
        assert_eq!(
            registry.initialize(&InitializeArgs {
                merkle_root,
                total_supply: 11,
                max_num_nodes: 4,
                token_mint: mint,
                token_vault: vault,
            }),
            Err(DistributorError::InsufficientVaultBalance {
                available: 10,
                requested: 11
            })
        );
    }
}
