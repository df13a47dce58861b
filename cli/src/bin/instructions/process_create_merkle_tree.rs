use crate::*;

pub fn process_create_merkle_tree(merkle_tree_args: &CreateMerkleTreeArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_recipients_file(
        &merkle_tree_args.recipients_path,
        merkle_tree_args.decimals,
    )?;
    merkle_tree.write_to_file(&merkle_tree_args.merkle_tree_path)?;

    println!(
        "wrote tree with {} recipients, root {:?}, total claim {} to {}",
        merkle_tree.tree_nodes.len(),
        merkle_tree.merkle_root,
        merkle_tree.max_total_claim,
        merkle_tree_args.merkle_tree_path.display()
    );
    Ok(())
}
