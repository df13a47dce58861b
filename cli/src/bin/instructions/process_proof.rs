use crate::*;

pub fn process_proof(proof_args: &ProofArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&proof_args.merkle_tree_path)?;
    let node = merkle_tree.get_node(&proof_args.claimant)?;

    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}
