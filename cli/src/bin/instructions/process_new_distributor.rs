use airdrop_merkle_verify::bitmap::{LEGACY_MAX_NUM_NODES, MAX_NUM_NODES};

use crate::*;

pub fn process_new_distributor(args: &Args, new_distributor_args: &NewDistributorArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&new_distributor_args.merkle_tree_path)?;
    println!("creating new distributor with args: {new_distributor_args:#?}");

    let ix = new_distributor_ix(
        &args.program_id,
        &args.mint,
        &merkle_tree,
        new_distributor_args,
    )?;
    write_instruction(&ix, new_distributor_args.out_path.as_deref())
}

pub fn new_distributor_ix(
    program_id: &Pubkey,
    mint: &Pubkey,
    merkle_tree: &AirdropMerkleTree,
    new_distributor_args: &NewDistributorArgs,
) -> Result<Instruction> {
    let merkle_root = merkle_tree.merkle_root;
    let max_num_nodes = match new_distributor_args.max_num_nodes {
        Some(max_num_nodes) => max_num_nodes,
        None => u32::try_from(merkle_tree.max_num_nodes)?.max(LEGACY_MAX_NUM_NODES),
    };
    if max_num_nodes > MAX_NUM_NODES || u64::from(max_num_nodes) < merkle_tree.max_num_nodes {
        return Err(anyhow!(
            "max_num_nodes {max_num_nodes} must cover {} leaves and stay within {MAX_NUM_NODES}",
            merkle_tree.max_num_nodes
        ));
    }

    let (distributor, _bump) = get_merkle_distributor_pda(program_id, &merkle_root);
    let (distributor_authority, _bump) = get_distributor_authority_pda(program_id, &merkle_root);
    let token_vault = new_distributor_args
        .token_vault
        .unwrap_or_else(|| get_vault_address(program_id, mint, &merkle_root));

    Ok(Instruction {
        program_id: *program_id,
        accounts: merkle_distributor::accounts::Initialize {
            distributor,
            distributor_authority,
            token_vault,
            token_mint: *mint,
            payer: new_distributor_args.payer,
            system_program: solana_program::system_program::ID,
            token_program: token::ID,
        }
        .to_account_metas(None),
        data: merkle_distributor::instruction::Initialize {
            merkle_root,
            total_supply: new_distributor_args
                .total_supply
                .unwrap_or_else(|| merkle_tree.max_total_claim.into()),
            max_num_nodes,
        }
        .data(),
    })
}
