//! Tree construction module

mod builder;
mod style;

pub use builder::{PhyloTree, TraversalParams, TreeBuilder, TreeEdge, TreeNode};
pub use style::{format_distance, LevelStyler, DEFAULT_BACKGROUND, DEFAULT_BORDER};
