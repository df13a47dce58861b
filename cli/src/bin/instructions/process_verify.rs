use crate::*;

pub fn process_verify(verify_args: &VerifyArgs) -> Result<()> {
    // loading already rebuilds the root and checks every stored proof
    let merkle_tree = AirdropMerkleTree::new_from_file(&verify_args.merkle_tree_path)?;

    for node in &merkle_tree.tree_nodes {
        let proof = node
            .proof
            .as_ref()
            .ok_or_else(|| anyhow!("missing proof for index {}", node.index))?;
        if !airdrop_merkle_verify::verify(proof, merkle_tree.merkle_root, node.hash()) {
            return Err(anyhow!("proof for index {} does not verify", node.index));
        }
    }

    println!(
        "verified {} proofs against root {:?}",
        merkle_tree.tree_nodes.len(),
        merkle_tree.merkle_root
    );
    Ok(())
}
