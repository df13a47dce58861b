use std::{fs::File, io::BufReader, path::Path, result};

use serde::{Deserialize, Serialize};

use crate::error::MerkleTreeError;

pub type Result<T> = result::Result<T, MerkleTreeError>;

/// One entry of the ordered recipient list; its position is its leaf index.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct RecipientEntry {
    /// Base58 pubkey of the recipient
    pub address: String,
    /// Amount to distribute, (ui amount unless decimals is 0)
    pub amount: u64,
}

impl RecipientEntry {
    /// Reads a JSON array of `{ "address": .., "amount": .. }` objects, order preserved.
    pub fn new_from_file(path: &Path) -> Result<Vec<Self>> {
        let file = File::open(path)?;
        let entries: Vec<RecipientEntry> = serde_json::from_reader(BufReader::new(file))?;
        Ok(entries)
    }
}
