use airdrop_merkle_verify::{DISTRIBUTOR_AUTHORITY_SEED, DISTRIBUTOR_SEED};
use solana_program::pubkey::Pubkey;

use crate::{error::MerkleTreeError, merkle_tree::MerkleTree, tree_node::TreeNode};

pub fn get_proof(merkle_tree: &MerkleTree, index: usize) -> Result<Vec<[u8; 32]>, MerkleTreeError> {
    merkle_tree
        .find_proof(index)
        .ok_or(MerkleTreeError::ProofNotFound(index))
}

/// Given a set of tree nodes, get the max total claim amount. `None` on overflow
pub fn get_max_total_claim(nodes: &[TreeNode]) -> Option<u64> {
    nodes
        .iter()
        .try_fold(0, |acc: u64, n| acc.checked_add(n.amount()))
}

/// Address of the distributor account committed to `merkle_root`.
pub fn get_merkle_distributor_pda(program_id: &Pubkey, merkle_root: &[u8; 32]) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[DISTRIBUTOR_SEED, merkle_root.as_ref()], program_id)
}

/// Authority owning the vault of the distributor committed to `merkle_root`.
/// Seeds are `b"distributor" || merkle_root`; it has no private key.
pub fn get_distributor_authority_pda(
    program_id: &Pubkey,
    merkle_root: &[u8; 32],
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[DISTRIBUTOR_AUTHORITY_SEED, merkle_root.as_ref()],
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    // Helper function to create a tree node
    fn create_node(index: u32, claimant: Pubkey, amount: u64) -> TreeNode {
        TreeNode {
            index,
            claimant,
            amount,
            proof: None,
        }
    }

    #[test]
    fn test_get_max_total_claim_no_overflow() {
        let nodes = vec![
            create_node(0, Pubkey::new_unique(), 100),
            create_node(1, Pubkey::new_unique(), 300),
        ];

        let total = get_max_total_claim(&nodes);
        assert_eq!(total, Some(400)); // 100 + 300
    }

    #[test]
    fn test_get_max_total_claim_overflow() {
        let nodes = vec![
            create_node(0, Pubkey::new_unique(), u64::MAX),
            create_node(1, Pubkey::new_unique(), 1),
        ];
        assert_eq!(get_max_total_claim(&nodes), None);
    }

    #[test]
    fn test_pdas_are_root_bound() {
        let program_id = Pubkey::new_unique();
        let root_a = [1u8; 32];
        let root_b = [2u8; 32];

        let (authority_a, bump_a) = get_distributor_authority_pda(&program_id, &root_a);
        assert_eq!(
            get_distributor_authority_pda(&program_id, &root_a),
            (authority_a, bump_a)
        );
        assert_ne!(
            get_distributor_authority_pda(&program_id, &root_b).0,
            authority_a
        );
        assert_ne!(get_merkle_distributor_pda(&program_id, &root_a).0, authority_a);
        assert!(!authority_a.is_on_curve());
    }

    #[test]
    fn test_get_proof_out_of_range() {
        let tree = MerkleTree::new(&[[1u8; 32], [2u8; 32]]);
        assert!(get_proof(&tree, 1).is_ok());
        assert!(matches!(
            get_proof(&tree, 2),
            Err(MerkleTreeError::ProofNotFound(2))
        ));
    }
}
