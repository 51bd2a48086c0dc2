//! JSON datasets in the node/relationship layout used by graph viewers

use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use super::{Dataset, DatasetError};
use crate::strain::{Category, NodeColor, Relationship, StrainNode, StrainSet};

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default, alias = "edges")]
    relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    label: Option<String>,
    rsp: Option<String>,
    category: Option<Category>,
    color: Option<NodeColor>,
}

impl RawNode {
    /// An explicit category wins over one inferred from the colour. The
    /// declared colours are kept for drawing.
    fn into_strain(self) -> StrainNode {
        let category = self.category.or_else(|| {
            self.color
                .as_ref()
                .and_then(|c| c.background.as_deref())
                .and_then(Category::from_background)
        });
        StrainNode {
            id: self.id,
            label: self.label,
            category,
            rsp: self.rsp.filter(|r| !r.is_empty()),
            color: self.color,
        }
    }
}

pub(super) fn load_file(path: &Path) -> Result<Dataset, DatasetError> {
    let content = fs::read_to_string(path)?;
    parse_json(&content)
}

/// Parse a dataset from JSON text
pub fn parse_json(content: &str) -> Result<Dataset, DatasetError> {
    let raw: RawDataset = serde_json::from_str(content)?;

    let mut strains = StrainSet::new();
    for node in raw.nodes {
        let strain = node.into_strain();
        let id = strain.id.clone();
        if !strains.insert(strain) {
            warn!("Duplicate strain id '{}' ignored", id);
        }
    }

    for rel in &raw.relationships {
        if !rel.distance.is_finite() || rel.distance < 0.0 {
            return Err(DatasetError::InvalidDistance {
                from: rel.from.clone(),
                to: rel.to.clone(),
                distance: rel.distance,
            });
        }
    }

    Ok(Dataset::new(strains, raw.relationships))
}
