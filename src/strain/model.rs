//! Strain and relationship data types

use serde::{Deserialize, Serialize};

/// Background colour used for strains with a full summary
pub const COMPLETE_COLOR: &str = "#2B7CE9";
/// Background colour used for strains only known by reference
pub const INCOMPLETE_COLOR: &str = "#97C2FC";

/// Classification of a strain by how much data is available for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Strain has its own summary (full data)
    Complete,
    /// Strain only appears as a relative of another strain
    Incomplete,
}

impl Category {
    /// Resolve a category from a node background colour.
    ///
    /// Only the two category colours, spelled exactly, are recognised;
    /// anything else is uncategorised.
    pub fn from_background(color: &str) -> Option<Self> {
        if color == COMPLETE_COLOR {
            Some(Category::Complete)
        } else if color == INCOMPLETE_COLOR {
            Some(Category::Incomplete)
        } else {
            None
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Category::Complete => COMPLETE_COLOR,
            Category::Incomplete => INCOMPLETE_COLOR,
        }
    }
}

/// Colours declared for a strain by its source data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

/// A strain in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<NodeColor>,
}

impl StrainNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            category: None,
            rsp: None,
            color: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_rsp(mut self, rsp: impl Into<String>) -> Self {
        self.rsp = Some(rsp.into());
        self
    }

    pub fn with_color(mut self, color: NodeColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Label shown in views: the label (or id) with underscores as spaces
    pub fn display_label(&self) -> String {
        self.label.as_deref().unwrap_or(&self.id).replace('_', " ")
    }

    /// Key used to order root candidates; a missing RSP sorts first
    pub fn rsp_key(&self) -> &str {
        self.rsp.as_deref().unwrap_or("")
    }
}

/// Genetic distance between two strains. The pair is unordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }

    /// The endpoint opposite `id`, if `id` is one of the endpoints
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }

    /// Endpoint ids in sorted order, identifying the pair regardless of direction
    pub fn pair_key(&self) -> (String, String) {
        pair_key(&self.from, &self.to)
    }
}

/// Sorted id pair for an unordered edge
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
