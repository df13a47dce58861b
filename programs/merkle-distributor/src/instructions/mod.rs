pub use claim::*;
pub use initialize::*;
pub mod claim;
pub mod initialize;
