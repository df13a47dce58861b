use airdrop_merkle_verify::hash_pair;

/// Binary Merkle tree over an ordered leaf sequence.
///
/// Nodes are paired as `(2k, 2k + 1)` on every level and combined with the
/// sorted-pair hash. When a level has an odd number of nodes the last one is
/// promoted unchanged to the next level, it is never paired with itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` are the leaves, the last level holds the root.
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(leaves: &[[u8; 32]]) -> Self {
        let mut levels = vec![leaves.to_vec()];

        while levels[levels.len() - 1].len() > 1 {
            let next_level = levels[levels.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(*left, *right),
                    [unpaired] => *unpaired,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(next_level);
        }

        Self { levels }
    }

    /// `None` for a tree without leaves.
    pub fn get_root(&self) -> Option<[u8; 32]> {
        self.levels.last().and_then(|level| level.first()).copied()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Sibling hashes from the leaf at `index` up to the root.
    ///
    /// Levels where the node was promoted without a sibling contribute nothing,
    /// so the proof can be shorter than [`MerkleTree::depth`].
    pub fn find_proof(&self, index: usize) -> Option<Vec<[u8; 32]>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut position = index;
        for level in &self.levels[..self.depth()] {
            let sibling = position ^ 1;
            if let Some(hash) = level.get(sibling) {
                proof.push(*hash);
            }
            position /= 2;
        }
        Some(proof)
    }
}
