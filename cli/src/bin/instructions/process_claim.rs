use crate::*;

pub fn process_claim(args: &Args, claim_args: &ClaimArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&claim_args.merkle_tree_path)?;
    println!("building claim for user {}...", claim_args.claimant);

    let ix = claim_ix(
        &args.program_id,
        &args.mint,
        &merkle_tree,
        &claim_args.claimant,
    )?;
    write_instruction(&ix, claim_args.out_path.as_deref())
}

/// Claim instruction paying the claimant's leaf into their associated token account.
/// The account has to exist before the instruction runs.
pub fn claim_ix(
    program_id: &Pubkey,
    mint: &Pubkey,
    merkle_tree: &AirdropMerkleTree,
    claimant: &Pubkey,
) -> Result<Instruction> {
    let node = merkle_tree.get_node(claimant)?;
    let merkle_root = merkle_tree.merkle_root;

    let (distributor, _bump) = get_merkle_distributor_pda(program_id, &merkle_root);
    let (authority, _bump) = get_distributor_authority_pda(program_id, &merkle_root);

    Ok(Instruction {
        program_id: *program_id,
        accounts: merkle_distributor::accounts::Claim {
            distributor,
            authority,
            vault: get_vault_address(program_id, mint, &merkle_root),
            to: get_associated_token_address(claimant, mint),
            token_program: token::ID,
        }
        .to_account_metas(None),
        data: merkle_distributor::instruction::Claim {
            index: node.index,
            amount: node.amount(),
            proof: node
                .proof
                .ok_or_else(|| anyhow!("proof not found for {claimant}"))?,
        }
        .data(),
    })
}
