//! Strain records and the node lookup they are served from

mod catalog;
mod model;

pub use catalog::{StrainCatalog, StrainSet};
pub use model::{
    pair_key, Category, NodeColor, Relationship, StrainNode, COMPLETE_COLOR, INCOMPLETE_COLOR,
};
