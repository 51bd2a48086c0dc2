//! straintree: phylogenetic tree views of strain genetic-distance data
//!
//! Strains and their pairwise genetic distances are loaded into a
//! [`dataset::Dataset`], turned into a rooted spanning tree by
//! [`tree::TreeBuilder`], and handed to one of the [`render`] backends.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod output;
pub mod render;
pub mod serve;
pub mod strain;
pub mod tree;
