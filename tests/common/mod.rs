//! Common test utilities

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use straintree::strain::{pair_key, Category, Relationship, StrainCatalog, StrainNode, StrainSet};
use straintree::tree::PhyloTree;

/// Get the path to the testdata directory
pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Small deterministic generator so failures reproduce from the seed
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: u64) -> u64 {
        if n == 0 {
            0
        } else {
            self.next_u64() % n
        }
    }

    /// Uniform in [0, max), rounded to three decimals so ties occur
    pub fn distance(&mut self, max: f64) -> f64 {
        let steps = (max * 1000.0) as u64;
        self.below(steps) as f64 / 1000.0
    }
}

/// A random dataset with mixed categories, missing RSPs, duplicate pairs
/// and relationships pointing at unknown strains
pub fn random_dataset(seed: u64) -> (StrainSet, Vec<Relationship>) {
    let mut rng = Lcg::new(seed);
    let count = rng.below(30) as usize;

    let mut strains = StrainSet::new();
    for i in 0..count {
        let mut node = StrainNode::new(format!("s{}", i));
        node.category = match rng.below(4) {
            0 => None,
            1 => Some(Category::Incomplete),
            _ => Some(Category::Complete),
        };
        if rng.below(5) != 0 {
            node.rsp = Some(format!("RSP{}", rng.below(50)));
        }
        strains.insert(node);
    }

    let mut relationships = Vec::new();
    let rel_count = rng.below((count as u64 + 1) * 4);
    for _ in 0..rel_count {
        let a = rng.below(count as u64 + 2);
        let b = rng.below(count as u64 + 2);
        relationships.push(Relationship::new(
            format!("s{}", a),
            format!("s{}", b),
            rng.distance(0.4),
        ));
    }

    (strains, relationships)
}

/// Straight recursive walk used as the reference for the iterative builder.
/// Returns (node id, level) in emission order and (from, to) edges.
pub fn recursive_walk(
    catalog: &StrainSet,
    relationships: &[Relationship],
    root: &str,
) -> (Vec<(String, u32)>, Vec<(String, String)>) {
    fn add(
        catalog: &StrainSet,
        relationships: &[Relationship],
        id: &str,
        level: u32,
        visited: &mut HashSet<String>,
        edge_keys: &mut HashSet<(String, String)>,
        nodes: &mut Vec<(String, u32)>,
        edges: &mut Vec<(String, String)>,
    ) {
        if visited.contains(id) || catalog.get(id).is_none() {
            return;
        }
        visited.insert(id.to_string());
        nodes.push((id.to_string(), level));

        let mut rels: Vec<&Relationship> = relationships
            .iter()
            .filter(|r| {
                let connected = r.from == id || r.to == id;
                let other = if r.from == id { &r.to } else { &r.from };
                connected && r.distance < 0.2 && catalog.get(other).is_some()
            })
            .collect();
        rels.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap());
        rels.truncate(3);

        for rel in rels {
            let child = if rel.from == id { &rel.to } else { &rel.from };
            if !visited.contains(child.as_str()) {
                let key = pair_key(id, child);
                if !edge_keys.contains(&key) {
                    edge_keys.insert(key);
                    edges.push((id.to_string(), child.clone()));
                    add(
                        catalog,
                        relationships,
                        child,
                        level + 1,
                        visited,
                        edge_keys,
                        nodes,
                        edges,
                    );
                }
            }
        }
    }

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    add(
        catalog,
        relationships,
        root,
        0,
        &mut HashSet::new(),
        &mut HashSet::new(),
        &mut nodes,
        &mut edges,
    );
    (nodes, edges)
}

/// Assert the structural properties every built tree must have
pub fn assert_tree_invariants(tree: &PhyloTree, relationships: &[Relationship]) {
    let mut ids = HashSet::new();
    for node in &tree.nodes {
        assert!(ids.insert(node.id.as_str()), "duplicate node {}", node.id);
    }

    let mut keys = HashSet::new();
    for edge in &tree.edges {
        assert!(
            keys.insert(pair_key(&edge.from, &edge.to)),
            "duplicate edge {}-{}",
            edge.from,
            edge.to
        );
    }

    if let Some(root) = tree.root() {
        assert_eq!(root.level, 0);
        assert!(tree.parent_edge(&root.id).is_none());
    }

    let levels: HashMap<&str, u32> = tree
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.level))
        .collect();
    for edge in &tree.edges {
        let from = levels[edge.from.as_str()];
        let to = levels[edge.to.as_str()];
        assert_eq!(to, from + 1, "edge {}-{}", edge.from, edge.to);
        assert_eq!(edge.level, from);
        assert!(edge.distance < 0.2);
        assert!(relationships
            .iter()
            .any(|r| r.pair_key() == pair_key(&edge.from, &edge.to) && r.distance == edge.distance));
    }

    // Every node but the root hangs off exactly one parent
    if !tree.is_empty() {
        assert_eq!(tree.edges.len(), tree.nodes.len() - 1);
        for node in tree.nodes.iter().skip(1) {
            assert_eq!(tree.edges.iter().filter(|e| e.to == node.id).count(), 1);
        }
    }

    for node in &tree.nodes {
        assert!(tree.child_edges(&node.id).count() <= 3);
    }
}
