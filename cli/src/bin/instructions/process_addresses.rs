use crate::*;

pub fn process_addresses(args: &Args, addresses_args: &AddressesArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&addresses_args.merkle_tree_path)?;
    let root = &merkle_tree.merkle_root;

    let (distributor, _bump) = get_merkle_distributor_pda(&args.program_id, root);
    let (authority, bump) = get_distributor_authority_pda(&args.program_id, root);

    println!("distributor: {distributor}");
    println!("authority:   {authority} (bump {bump})");
    println!(
        "vault:       {}",
        get_vault_address(&args.program_id, &args.mint, root)
    );
    Ok(())
}
