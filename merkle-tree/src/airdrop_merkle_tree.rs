use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Write},
    path::Path,
    result,
};

use airdrop_merkle_verify::{bitmap::MAX_NUM_NODES, verify};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{
    error::{MerkleTreeError, MerkleTreeError::MerkleValidationError},
    merkle_tree::MerkleTree,
    recipient_entry::RecipientEntry,
    tree_node::TreeNode,
    utils::{get_max_total_claim, get_proof},
};

/// Merkle Tree which will be used to distribute tokens to claimants.
/// Contains all the information necessary to verify claims against the Merkle Tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropMerkleTree {
    /// The merkle root, which is uploaded on-chain
    pub merkle_root: [u8; 32],
    pub max_num_nodes: u64,
    pub max_total_claim: u64,
    pub tree_nodes: Vec<TreeNode>,
}

pub type Result<T> = result::Result<T, MerkleTreeError>;

impl AirdropMerkleTree {
    /// Builds the tree over `tree_nodes` in the given order.
    /// Node `i` must carry index `i`; the recipient set is frozen from here on.
    pub fn new(mut tree_nodes: Vec<TreeNode>) -> Result<Self> {
        Self::validate_nodes(&tree_nodes)?;

        let hashed_nodes = tree_nodes.iter().map(TreeNode::hash).collect::<Vec<_>>();
        let tree = MerkleTree::new(&hashed_nodes[..]);

        for (i, tree_node) in tree_nodes.iter_mut().enumerate() {
            tree_node.proof = Some(get_proof(&tree, i)?);
        }

        let max_total_claim = get_max_total_claim(&tree_nodes).ok_or_else(|| {
            MerkleValidationError("Sum of claim amounts overflows u64".to_string())
        })?;
        let tree = AirdropMerkleTree {
            merkle_root: tree.get_root().ok_or(MerkleTreeError::MerkleRootError)?,
            max_num_nodes: tree_nodes.len() as u64,
            max_total_claim,
            tree_nodes,
        };

        println!(
            "created merkle tree with {} nodes and max total claim of {}",
            tree.max_num_nodes, tree.max_total_claim
        );
        tree.validate()?;
        Ok(tree)
    }

    /// Builds the tree from an ordered recipient list; the index of each entry is its position.
    pub fn new_from_entries(entries: &[RecipientEntry], decimals: u32) -> Result<Self> {
        let tree_nodes = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let index = u32::try_from(i).map_err(|_| {
                    MerkleValidationError(format!("Index {i} does not fit in u32"))
                })?;
                TreeNode::from_entry(index, entry, decimals)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(tree_nodes)
    }

    /// Load a merkle tree from a JSON recipient list
    pub fn new_from_recipients_file(path: &Path, decimals: u32) -> Result<Self> {
        let entries = RecipientEntry::new_from_file(path)?;
        Self::new_from_entries(&entries, decimals)
    }

    /// Load a serialized merkle tree from file path
    pub fn new_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let tree: AirdropMerkleTree = serde_json::from_reader(reader)?;
        tree.validate()?;

        Ok(tree)
    }

    /// Write a merkle tree to a filepath
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self)?;
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    pub fn get_node(&self, claimant: &Pubkey) -> Result<TreeNode> {
        self.tree_nodes
            .iter()
            .find(|n| n.claimant == *claimant)
            .cloned()
            .ok_or_else(|| MerkleTreeError::ClaimantNotFound(claimant.to_string()))
    }

    pub fn get_node_by_index(&self, index: u32) -> Option<&TreeNode> {
        self.tree_nodes.get(index as usize)
    }

    fn validate_nodes(tree_nodes: &[TreeNode]) -> Result<()> {
        if tree_nodes.is_empty() {
            return Err(MerkleValidationError(
                "Recipient list is empty".to_string(),
            ));
        }

        if tree_nodes.len() > MAX_NUM_NODES as usize {
            return Err(MerkleValidationError(format!(
                "Num nodes {} is greater than {}",
                tree_nodes.len(),
                MAX_NUM_NODES
            )));
        }

        // indices are positions, proofs are bound to them
        if let Some((i, node)) = tree_nodes
            .iter()
            .enumerate()
            .find(|(i, n)| n.index as usize != *i)
        {
            return Err(MerkleValidationError(format!(
                "Node at position {} has index {}",
                i, node.index
            )));
        }

        let unique_nodes: HashSet<_> = tree_nodes.iter().map(|n| n.claimant).collect();
        if unique_nodes.len() != tree_nodes.len() {
            return Err(MerkleValidationError(
                "Duplicate claimants found".to_string(),
            ));
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        Self::validate_nodes(&self.tree_nodes)?;

        // validate that the length is equal to the max_num_nodes
        if self.tree_nodes.len() != self.max_num_nodes as usize {
            return Err(MerkleValidationError(format!(
                "Tree nodes length {} does not match max_num_nodes {}",
                self.tree_nodes.len(),
                self.max_num_nodes
            )));
        }

        // validate that sum is equal to max_total_claim
        let sum = get_max_total_claim(&self.tree_nodes);

        if sum != Some(self.max_total_claim) {
            return Err(MerkleValidationError(format!(
                "Tree nodes sum {:?} does not match max_total_claim {}",
                sum, self.max_total_claim
            )));
        }

        if self.verify_proof().is_err() {
            return Err(MerkleValidationError(
                "Merkle root is invalid given nodes".to_string(),
            ));
        }

        Ok(())
    }

    /// verify that the leaves of the merkle tree match the nodes
    pub fn verify_proof(&self) -> Result<()> {
        let root = self.merkle_root;

        // Recreate root given nodes
        let hashed_nodes: Vec<[u8; 32]> = self.tree_nodes.iter().map(TreeNode::hash).collect();
        let mk = MerkleTree::new(&hashed_nodes[..]);

        if mk.get_root() != Some(root) {
            return Err(MerkleValidationError(
                "merkle root does not match nodes".to_string(),
            ));
        }

        // Verify each node against the root, with both the rebuilt and the stored proof
        for (i, node) in self.tree_nodes.iter().enumerate() {
            let proof = get_proof(&mk, i)?;
            if !verify(&proof, root, hashed_nodes[i]) {
                return Err(MerkleValidationError("invalid merkle proof".to_string()));
            }
            if let Some(stored) = &node.proof {
                if stored != &proof {
                    return Err(MerkleValidationError(format!(
                        "stored proof for index {i} is stale"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Claimant lookup table, in leaf index order
    pub fn convert_to_index_map(&self) -> IndexMap<Pubkey, TreeNode> {
        self.tree_nodes
            .iter()
            .map(|n| (n.claimant, n.clone()))
            .collect()
    }
}
