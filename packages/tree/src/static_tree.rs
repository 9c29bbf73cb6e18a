use std::collections::HashMap;
use std::hash::Hash;

use crate::TreeView;

/// Owned tree built up front, for hosts without a tree of their own and for tests
#[derive(Debug, Clone)]
pub struct StaticTree<Id> {
    roots: Vec<Id>,
    children: HashMap<Id, Vec<Id>>,
    parents: HashMap<Id, Id>,
}

impl<Id: Clone + Eq + Hash> StaticTree<Id> {
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            children: HashMap::new(),
            parents: HashMap::new(),
        }
    }

    /// Append a top-level node
    pub fn with_root(mut self, id: Id) -> Self {
        self.roots.push(id);
        self
    }

    /// Append `child` as the last child of `parent`
    pub fn with_child(mut self, parent: Id, child: Id) -> Self {
        self.parents.insert(child.clone(), parent.clone());
        self.children.entry(parent).or_default().push(child);
        self
    }
}

impl<Id: Clone + Eq + Hash> Default for StaticTree<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Clone + Eq + Hash> TreeView for StaticTree<Id> {
    type Id = Id;

    fn roots(&self) -> Vec<Id> {
        self.roots.clone()
    }

    fn children(&self, id: &Id) -> Vec<Id> {
        self.children.get(id).cloned().unwrap_or_default()
    }

    fn parent(&self, id: &Id) -> Option<Id> {
        self.parents.get(id).cloned()
    }
}
