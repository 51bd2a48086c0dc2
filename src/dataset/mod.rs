//! Strain datasets loaded from disk

mod json;
mod summary;

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::strain::{Relationship, StrainSet};
use crate::tree::{PhyloTree, TraversalParams, TreeBuilder};

pub use json::parse_json;
pub use summary::{discover_summaries, parse_summary, Relative, StrainSummary};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse dataset JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No *_summary.txt files found under {0:?}")]
    NoSummaries(PathBuf),

    #[error("Invalid distance {distance} between '{from}' and '{to}'")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    #[error("Unsupported input {0:?}: expected a summary directory or a .json file")]
    UnsupportedInput(PathBuf),
}

/// Strains and the genetic distances between them
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub strains: StrainSet,
    pub relationships: Vec<Relationship>,
}

impl Dataset {
    pub fn new(strains: StrainSet, relationships: Vec<Relationship>) -> Self {
        Self {
            strains,
            relationships,
        }
    }

    /// Load a dataset from a summary directory or a JSON file
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let dataset = if path.is_dir() {
            summary::load_dir(path)?
        } else if path.extension().is_some_and(|ext| ext == "json") {
            json::load_file(path)?
        } else {
            return Err(DatasetError::UnsupportedInput(path.to_path_buf()));
        };

        info!(
            "Loaded {} strains and {} relationships from {:?}",
            dataset.strains.len(),
            dataset.relationships.len(),
            path
        );
        Ok(dataset)
    }

    pub fn build_tree(&self, params: TraversalParams) -> PhyloTree {
        TreeBuilder::build_with(&self.strains, &self.relationships, params)
    }
}
