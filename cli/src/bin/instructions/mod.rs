pub mod instruction_payload;
pub mod process_addresses;
pub mod process_claim;
pub mod process_create_merkle_tree;
pub mod process_new_distributor;
pub mod process_proof;
pub mod process_verify;

pub use instruction_payload::*;
pub use process_addresses::*;
pub use process_claim::*;
pub use process_create_merkle_tree::*;
pub use process_new_distributor::*;
pub use process_proof::*;
pub use process_verify::*;
