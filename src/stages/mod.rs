pub mod stage0_normalize;
pub mod stage1_primary_speaker;
pub mod stage2_merge;
pub mod stage3_render;

pub use stage0_normalize::*;
pub use stage1_primary_speaker::*;
pub use stage2_merge::*;
pub use stage3_render::*;
