//! Node lookup over a strain collection

use std::collections::HashMap;

use super::model::StrainNode;

/// Lookup of strains by id
pub trait StrainCatalog {
    /// Get a strain by id
    fn get(&self, id: &str) -> Option<&StrainNode>;

    /// All strains, in catalog order
    fn all(&self) -> Vec<&StrainNode>;

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// Insertion-ordered set of strains keyed by id
#[derive(Debug, Clone, Default)]
pub struct StrainSet {
    strains: Vec<StrainNode>,
    index: HashMap<String, usize>,
}

impl StrainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a strain. Returns false and keeps the existing entry if the id is taken.
    pub fn insert(&mut self, strain: StrainNode) -> bool {
        if self.index.contains_key(&strain.id) {
            return false;
        }
        self.index.insert(strain.id.clone(), self.strains.len());
        self.strains.push(strain);
        true
    }

    pub fn len(&self) -> usize {
        self.strains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strains.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StrainNode> {
        self.strains.iter()
    }
}

impl StrainCatalog for StrainSet {
    fn get(&self, id: &str) -> Option<&StrainNode> {
        self.index.get(id).map(|&idx| &self.strains[idx])
    }

    fn all(&self) -> Vec<&StrainNode> {
        self.strains.iter().collect()
    }
}

impl FromIterator<StrainNode> for StrainSet {
    fn from_iter<I: IntoIterator<Item = StrainNode>>(iter: I) -> Self {
        let mut set = StrainSet::new();
        for strain in iter {
            set.insert(strain);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let mut set = StrainSet::new();
        assert!(set.insert(StrainNode::new("a").with_rsp("RSP1")));
        assert!(!set.insert(StrainNode::new("a").with_rsp("RSP2")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a").and_then(|s| s.rsp.as_deref()), Some("RSP1"));
    }

    #[test]
    fn test_all_keeps_insertion_order() {
        let set: StrainSet = ["c", "a", "b"].into_iter().map(StrainNode::new).collect();
        let ids: Vec<&str> = set.all().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(set.contains("b"));
        assert!(!set.contains("d"));
    }
}
