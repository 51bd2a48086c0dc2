//! Phylogenetic tree builder

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::style::{LevelStyler, DEFAULT_BACKGROUND, DEFAULT_BORDER};
use crate::strain::{pair_key, Category, NodeColor, Relationship, StrainCatalog, StrainNode};

/// Limits applied while expanding a node's neighbours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalParams {
    /// Relationships at or above this distance are never followed
    pub max_distance: f64,
    /// Number of nearest neighbours expanded per node
    pub fanout: usize,
}

impl Default for TraversalParams {
    fn default() -> Self {
        Self {
            max_distance: 0.2,
            fanout: 3,
        }
    }
}

/// A strain placed in the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    /// Depth from the root
    pub level: u32,
    pub category: Option<Category>,
    pub rsp: Option<String>,
    /// Colours declared by the source data, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NodeColor>,
    pub size: f64,
    pub font_size: f64,
    pub tooltip: String,
}

impl TreeNode {
    /// Declared background, else the category colour, else the default
    pub fn background(&self) -> &str {
        self.color
            .as_ref()
            .and_then(|c| c.background.as_deref())
            .or_else(|| self.category.map(Category::background))
            .unwrap_or(DEFAULT_BACKGROUND)
    }

    pub fn border(&self) -> &str {
        self.color
            .as_ref()
            .and_then(|c| c.border.as_deref())
            .unwrap_or(DEFAULT_BORDER)
    }
}

/// A parent → child link in the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEdge {
    /// Parent id
    pub from: String,
    /// Child id
    pub to: String,
    pub distance: f64,
    /// Level of the parent endpoint
    pub level: u32,
    pub width: f64,
    pub opacity: f64,
    pub tooltip: String,
}

impl TreeEdge {
    /// Sorted endpoint ids joined with `_`
    pub fn key(&self) -> String {
        let (a, b) = pair_key(&self.from, &self.to);
        format!("{}_{}", a, b)
    }
}

/// Node and edge sets of a rooted spanning tree, in emission order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhyloTree {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
}

impl PhyloTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges leading from `id` to its children, in emission order
    pub fn child_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TreeEdge> + 'a {
        self.edges.iter().filter(move |e| e.from == id)
    }

    pub fn parent_edge(&self, id: &str) -> Option<&TreeEdge> {
        self.edges.iter().find(|e| e.to == id)
    }

    /// Number of levels below the root (0 for a lone root)
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }
}

/// Builds a rooted spanning tree by greedily following nearest relatives
pub struct TreeBuilder;

impl TreeBuilder {
    /// Build a tree with the default traversal limits
    pub fn build<C>(catalog: &C, relationships: &[Relationship]) -> PhyloTree
    where
        C: StrainCatalog + ?Sized,
    {
        Self::build_with(catalog, relationships, TraversalParams::default())
    }

    /// Build a tree from the strains in `catalog`.
    ///
    /// The root is chosen by [`TreeBuilder::select_root`]. From each placed
    /// node the closest `fanout` relatives under `max_distance` are
    /// explored depth-first; relatives already placed are skipped, so the
    /// result never contains cycles. An empty tree is returned when no
    /// strain qualifies as root.
    pub fn build_with<C>(
        catalog: &C,
        relationships: &[Relationship],
        params: TraversalParams,
    ) -> PhyloTree
    where
        C: StrainCatalog + ?Sized,
    {
        let Some(root) = Self::select_root(catalog) else {
            debug!("No complete or incomplete strains; tree is empty");
            return PhyloTree::default();
        };
        debug!("Root strain: {} (RSP {})", root.id, root.rsp_key());

        let mut traversal = Traversal::new(catalog, relationships, params);
        traversal.run(&root.id);

        debug!(
            "Tree has {} nodes and {} edges",
            traversal.tree.nodes.len(),
            traversal.tree.edges.len()
        );
        traversal.tree
    }

    /// First categorised strain by RSP ascending. Ties keep catalog order.
    pub fn select_root<C>(catalog: &C) -> Option<&StrainNode>
    where
        C: StrainCatalog + ?Sized,
    {
        let mut candidates: Vec<&StrainNode> = catalog
            .all()
            .into_iter()
            .filter(|s| s.category.is_some())
            .collect();
        candidates.sort_by(|a, b| a.rsp_key().cmp(b.rsp_key()));
        candidates.into_iter().next()
    }
}

/// A placed node whose nearest relatives are still being explored
struct Frame<'r> {
    id: String,
    level: u32,
    relatives: Vec<&'r Relationship>,
    next: usize,
}

/// State of one build; nothing here outlives the call
struct Traversal<'r, C: StrainCatalog + ?Sized> {
    catalog: &'r C,
    relationships: &'r [Relationship],
    params: TraversalParams,
    styler: LevelStyler,
    visited: HashSet<String>,
    emitted_edges: HashSet<(String, String)>,
    tree: PhyloTree,
}

impl<'r, C: StrainCatalog + ?Sized> Traversal<'r, C> {
    fn new(catalog: &'r C, relationships: &'r [Relationship], params: TraversalParams) -> Self {
        Self {
            catalog,
            relationships,
            params,
            styler: LevelStyler::new(),
            visited: HashSet::new(),
            emitted_edges: HashSet::new(),
            tree: PhyloTree::default(),
        }
    }

    /// Depth-first pre-order walk with an explicit stack. A child's whole
    /// subtree is placed before its next sibling is considered.
    fn run(&mut self, root_id: &str) {
        let mut stack: Vec<Frame<'r>> = Vec::new();
        if let Some(frame) = self.visit(root_id, 0) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(rel) = frame.relatives.get(frame.next).copied() else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let parent_id = frame.id.clone();
            let level = frame.level;
            let Some(child_id) = rel.other_end(&parent_id) else {
                continue;
            };
            if self.visited.contains(child_id) {
                continue;
            }
            if !self.emitted_edges.insert(pair_key(&parent_id, child_id)) {
                continue;
            }

            self.tree.edges.push(TreeEdge {
                from: parent_id,
                to: child_id.to_string(),
                distance: rel.distance,
                level,
                width: self.styler.edge_width(level),
                opacity: self.styler.edge_opacity(level),
                tooltip: self.styler.edge_tooltip(rel.distance),
            });

            if let Some(child) = self.visit(child_id, level + 1) {
                stack.push(child);
            }
        }
    }

    /// Place a node and collect its nearest relatives. Returns None when
    /// the node is already placed or unknown to the catalog.
    fn visit(&mut self, id: &str, level: u32) -> Option<Frame<'r>> {
        if self.visited.contains(id) {
            return None;
        }
        let catalog = self.catalog;
        let strain = catalog.get(id)?;
        self.visited.insert(id.to_string());

        let label = strain.display_label();
        self.tree.nodes.push(TreeNode {
            id: id.to_string(),
            tooltip: self.styler.node_tooltip(&label, strain.rsp.as_deref()),
            label,
            level,
            category: strain.category,
            rsp: strain.rsp.clone(),
            color: strain.color.clone(),
            size: self.styler.node_size(level),
            font_size: self.styler.font_size(level),
        });

        Some(Frame {
            id: id.to_string(),
            level,
            relatives: self.nearest_relatives(id),
            next: 0,
        })
    }

    fn nearest_relatives(&self, id: &str) -> Vec<&'r Relationship> {
        let relationships: &'r [Relationship] = self.relationships;
        let mut relatives: Vec<&'r Relationship> = relationships
            .iter()
            .filter(|rel| {
                rel.distance < self.params.max_distance
                    && rel
                        .other_end(id)
                        .is_some_and(|other| self.catalog.contains(other))
            })
            .collect();

        // Stable: equal distances keep their input order
        relatives.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        relatives.truncate(self.params.fanout);
        relatives
    }
}
