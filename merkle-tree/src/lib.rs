pub mod airdrop_merkle_tree;
pub mod error;
pub mod merkle_tree;
pub mod recipient_entry;
pub mod tree_node;
pub mod utils;
