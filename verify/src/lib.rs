//! Canonical hashing rules for the Merkle distributor.
//!
//! Every party that touches a proof (the tree builder, the on-chain program and
//! the standalone claim service) goes through this crate, so the leaf layout and
//! the pair ordering can never drift apart between producers and verifiers.

use solana_program::keccak::hashv;

pub mod bitmap;

/// Seed prefix of the PDA that owns a distributor's vault: `b"distributor" || root`.
pub const DISTRIBUTOR_AUTHORITY_SEED: &[u8] = b"distributor";

/// Seed prefix of the distributor account itself: `b"MerkleDistributor" || root`.
pub const DISTRIBUTOR_SEED: &[u8] = b"MerkleDistributor";

/// A tree over at most 2^32 leaves can never need more siblings than this.
pub const MAX_PROOF_LEN: usize = 32;

/// Encodes one airdrop entry into its leaf hash.
///
/// Layout before hashing is fixed width: `u32 LE index || 32 byte recipient || u64 LE amount`.
/// Changing field order or width breaks every root already published.
pub fn hash_leaf(index: u32, recipient: &[u8; 32], amount: u64) -> [u8; 32] {
    hashv(&[&index.to_le_bytes(), recipient, &amount.to_le_bytes()]).to_bytes()
}

/// Orders two children so that the smaller one comes first.
pub fn sort_pair(a: [u8; 32], b: [u8; 32]) -> ([u8; 32], [u8; 32]) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Parent hash of two nodes. Independent of which child sits on the left.
pub fn hash_pair(a: [u8; 32], b: [u8; 32]) -> [u8; 32] {
    let (left, right) = sort_pair(a, b);
    hashv(&[&left, &right]).to_bytes()
}

/// Returns true if a `leaf` can be proved to be a part of a Merkle tree
/// defined by `root`. `proof` holds the sibling hashes on the branch from the
/// leaf up to the root, in that order. Each pair is sorted before hashing.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let computed_hash = proof
        .iter()
        .fold(leaf, |computed_hash, proof_element| {
            hash_pair(computed_hash, *proof_element)
        });
    computed_hash == root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_leaf_layout() {
        let recipient = [7u8; 32];
        let mut preimage = Vec::new();
        preimage.extend_from_slice(&3u32.to_le_bytes());
        preimage.extend_from_slice(&recipient);
        preimage.extend_from_slice(&100u64.to_le_bytes());
        assert_eq!(preimage.len(), 44);

        let expected = solana_program::keccak::hash(&preimage).to_bytes();
        assert_eq!(hash_leaf(3, &recipient, 100), expected);
    }

    #[test]
    fn test_hash_leaf_is_field_sensitive() {
        let recipient = [7u8; 32];
        let leaf = hash_leaf(0, &recipient, 100);
        assert_ne!(leaf, hash_leaf(1, &recipient, 100));
        assert_ne!(leaf, hash_leaf(0, &[8u8; 32], 100));
        assert_ne!(leaf, hash_leaf(0, &recipient, 101));
    }

    #[test]
    fn test_hash_pair_order_independent() {
        let a = hash_leaf(0, &[1u8; 32], 10);
        let b = hash_leaf(1, &[2u8; 32], 20);
        assert_eq!(hash_pair(a, b), hash_pair(b, a));
        assert_eq!(sort_pair(a, b), sort_pair(b, a));
    }

    #[test]
    fn test_verify_two_leaves() {
        let a = hash_leaf(0, &[1u8; 32], 100);
        let b = hash_leaf(1, &[2u8; 32], 250);
        let root = hash_pair(a, b);

        assert!(verify(&[b], root, a));
        assert!(verify(&[a], root, b));
        // no partial matches
        assert!(!verify(&[], root, a));
        assert!(!verify(&[b, b], root, a));
    }

    #[test]
    fn test_verify_single_leaf_empty_proof() {
        let leaf = hash_leaf(0, &[9u8; 32], 1);
        assert!(verify(&[], leaf, leaf));
    }

    #[test]
    fn test_verify_rejects_flipped_bit() {
        let a = hash_leaf(0, &[1u8; 32], 100);
        let b = hash_leaf(1, &[2u8; 32], 250);
        let root = hash_pair(a, b);

        for byte in 0..32 {
            for bit in 0..8 {
                let mut tampered = b;
                tampered[byte] ^= 1 << bit;
                assert!(!verify(&[tampered], root, a));
            }
        }
    }
}
