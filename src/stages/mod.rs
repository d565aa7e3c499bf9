pub mod stage1_resolve;
pub mod stage2_group;
pub mod stage3_reconstruct;

pub use stage1_resolve::*;
pub use stage2_group::*;
pub use stage3_reconstruct::*;
