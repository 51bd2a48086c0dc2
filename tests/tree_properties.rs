//! Structural properties of built trees over generated datasets

mod common;

use common::{assert_tree_invariants, random_dataset, recursive_walk};
use straintree::strain::{Category, Relationship, StrainNode, StrainSet};
use straintree::tree::TreeBuilder;

const SEEDS: u64 = 300;

#[test]
fn test_invariants_hold_for_generated_datasets() {
    for seed in 0..SEEDS {
        let (strains, relationships) = random_dataset(seed);
        let tree = TreeBuilder::build(&strains, &relationships);
        assert_tree_invariants(&tree, &relationships);
    }
}

#[test]
fn test_matches_recursive_walk() {
    for seed in 0..SEEDS {
        let (strains, relationships) = random_dataset(seed);
        let tree = TreeBuilder::build(&strains, &relationships);

        let Some(root) = TreeBuilder::select_root(&strains) else {
            assert!(tree.is_empty(), "seed {}", seed);
            continue;
        };
        let (nodes, edges) = recursive_walk(&strains, &relationships, &root.id);

        let built_nodes: Vec<(String, u32)> = tree
            .nodes
            .iter()
            .map(|n| (n.id.clone(), n.level))
            .collect();
        let built_edges: Vec<(String, String)> = tree
            .edges
            .iter()
            .map(|e| (e.from.clone(), e.to.clone()))
            .collect();

        assert_eq!(built_nodes, nodes, "seed {}", seed);
        assert_eq!(built_edges, edges, "seed {}", seed);
    }
}

#[test]
fn test_root_is_lowest_rsp_among_categorised() {
    for seed in 0..SEEDS {
        let (strains, relationships) = random_dataset(seed);
        let tree = TreeBuilder::build(&strains, &relationships);

        let expected = strains
            .iter()
            .filter(|s| s.category.is_some())
            .map(|s| s.rsp.clone().unwrap_or_default())
            .min();

        match tree.root() {
            Some(root) => {
                assert_eq!(Some(root.rsp.clone().unwrap_or_default()), expected);
                assert!(root.category.is_some());
                assert_eq!(root.level, 0);
            }
            None => assert!(expected.is_none(), "seed {}", seed),
        }
    }
}

#[test]
fn test_hub_with_five_close_neighbours_keeps_three() {
    let mut strains: StrainSet = vec![StrainNode::new("hub")
        .with_rsp("RSP1")
        .with_category(Category::Complete)]
    .into_iter()
    .collect();
    let mut relationships = Vec::new();
    for i in 0..5 {
        let id = format!("leaf{}", i);
        strains.insert(StrainNode::new(id.as_str()).with_category(Category::Incomplete).with_rsp("RSP9"));
        relationships.push(Relationship::new("hub", id, 0.05 + 0.01 * i as f64));
    }

    let tree = TreeBuilder::build(&strains, &relationships);

    assert_eq!(tree.nodes.len(), 4);
    assert_eq!(tree.child_edges("hub").count(), 3);
    let children: Vec<&str> = tree.child_edges("hub").map(|e| e.to.as_str()).collect();
    assert_eq!(children, vec!["leaf0", "leaf1", "leaf2"]);
}

#[test]
fn test_distant_relationships_never_become_edges() {
    let strains: StrainSet = ["a", "b", "c"]
        .into_iter()
        .map(|id| StrainNode::new(id).with_category(Category::Complete))
        .collect();
    let relationships = vec![
        Relationship::new("a", "b", 0.2),
        Relationship::new("b", "c", 0.5),
        Relationship::new("a", "c", 0.199),
    ];

    let tree = TreeBuilder::build(&strains, &relationships);

    assert_eq!(tree.edges.len(), 1);
    assert_eq!((tree.edges[0].from.as_str(), tree.edges[0].to.as_str()), ("a", "c"));
}

#[test]
fn test_empty_input_builds_empty_tree() {
    let tree = TreeBuilder::build(&StrainSet::new(), &[]);
    assert!(tree.nodes.is_empty());
    assert!(tree.edges.is_empty());

    // Relationships alone do not create strains
    let tree = TreeBuilder::build(&StrainSet::new(), &[Relationship::new("a", "b", 0.01)]);
    assert!(tree.is_empty());
}
