use std::fs;

use serde::{Deserialize, Serialize};

use crate::*;

/// JSON form of an unsigned [Instruction], keys in base58.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct InstructionPayload {
    pub program_id: String,
    pub accounts: Vec<AccountMetaPayload>,
    pub data: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct AccountMetaPayload {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl From<&Instruction> for InstructionPayload {
    fn from(ix: &Instruction) -> Self {
        Self {
            program_id: ix.program_id.to_string(),
            accounts: ix
                .accounts
                .iter()
                .map(|meta| AccountMetaPayload {
                    pubkey: meta.pubkey.to_string(),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect(),
            data: ix.data.clone(),
        }
    }
}

/// Writes the instruction as pretty JSON to `out_path`, or stdout.
pub fn write_instruction(ix: &Instruction, out_path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&InstructionPayload::from(ix))?;
    match out_path {
        Some(path) => {
            fs::write(path, json)?;
            println!("wrote instruction to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// The vault convention: the authority's associated token account for `mint`.
pub fn get_vault_address(program_id: &Pubkey, mint: &Pubkey, merkle_root: &[u8; 32]) -> Pubkey {
    let (authority, _bump) = get_distributor_authority_pda(program_id, merkle_root);
    get_associated_token_address(&authority, mint)
}

#[cfg(test)]
mod tests {
    use solana_program::instruction::AccountMeta;

    use super::*;

    #[test]
    fn test_payload_keeps_meta_flags() {
        let signer = Pubkey::new_unique();
        let readonly = Pubkey::new_unique();
        let ix = Instruction {
            program_id: merkle_distributor::id(),
            accounts: vec![
                AccountMeta::new(signer, true),
                AccountMeta::new_readonly(readonly, false),
            ],
            data: vec![1, 2, 3],
        };

        let payload = InstructionPayload::from(&ix);
        assert_eq!(payload.program_id, merkle_distributor::id().to_string());
        assert_eq!(
            payload.accounts[0],
            AccountMetaPayload {
                pubkey: signer.to_string(),
                is_signer: true,
                is_writable: true,
            }
        );
        assert!(!payload.accounts[1].is_writable);
        assert_eq!(payload.data, vec![1, 2, 3]);
    }
}
