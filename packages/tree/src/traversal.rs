//! # Visible-node traversal
//!
//! Pure functions over an abstract ordered tree and an expansion set.
//!
//! The tree is described by [`TreeView`]; nothing here knows how (or whether)
//! the tree is rendered. Expansion is passed separately so the same view can
//! be walked under different expansion states.

use std::collections::HashSet;
use std::hash::Hash;

/// Read-only view of an ordered tree
pub trait TreeView {
    type Id: Clone + Eq + Hash;

    /// Top-level nodes, in order
    fn roots(&self) -> Vec<Self::Id>;

    /// Direct children of `id`, in order (empty for leaves and unknown ids)
    fn children(&self, id: &Self::Id) -> Vec<Self::Id>;

    /// Parent of `id`, `None` for top-level nodes and unknown ids
    fn parent(&self, id: &Self::Id) -> Option<Self::Id>;
}

#[derive(Clone, Copy)]
enum Direction {
    Next,
    Previous,
}

fn sibling<T: TreeView>(tree: &T, node: &T::Id, direction: Direction) -> Option<T::Id> {
    let siblings = match tree.parent(node) {
        Some(parent) => tree.children(&parent),
        None => tree.roots(),
    };
    let index = siblings.iter().position(|s| s == node)?;

    match direction {
        Direction::Next => siblings.get(index + 1).cloned(),
        Direction::Previous => index.checked_sub(1).and_then(|i| siblings.get(i).cloned()),
    }
}

/// The first top-level node
pub fn first_visible<T: TreeView>(tree: &T) -> Option<T::Id> {
    tree.roots().into_iter().next()
}

/// The first child of `node`, if it has any
///
/// Does not look at expansion; ArrowRight only calls this on expanded nodes.
pub fn first_visible_child<T: TreeView>(tree: &T, node: &T::Id) -> Option<T::Id> {
    tree.children(node).into_iter().next()
}

/// The node after `node` in visible order
///
/// 1. expanded with children: its first child
/// 2. otherwise its next sibling
/// 3. otherwise the next sibling of the nearest ancestor that has one
pub fn next_visible<T: TreeView>(
    tree: &T,
    expanded: &HashSet<T::Id>,
    node: &T::Id,
) -> Option<T::Id> {
    if expanded.contains(node) {
        if let Some(child) = first_visible_child(tree, node) {
            return Some(child);
        }
    }

    let mut current = node.clone();

    loop {
        if let Some(next) = sibling(tree, &current, Direction::Next) {
            return Some(next);
        }

        current = tree.parent(&current)?;
    }
}

/// The node before `node` in visible order
///
/// The deepest last visible descendant of the previous sibling, else the
/// parent.
pub fn previous_visible<T: TreeView>(
    tree: &T,
    expanded: &HashSet<T::Id>,
    node: &T::Id,
) -> Option<T::Id> {
    match sibling(tree, node, Direction::Previous) {
        Some(previous) => Some(last_visible_descendant(tree, expanded, previous)),
        None => tree.parent(node),
    }
}

/// Follow last children down from `node` while each step is expanded
pub fn last_visible_descendant<T: TreeView>(
    tree: &T,
    expanded: &HashSet<T::Id>,
    node: T::Id,
) -> T::Id {
    let mut current = node;

    while expanded.contains(&current) {
        match tree.children(&current).pop() {
            Some(last) => current = last,
            None => break,
        }
    }

    current
}

/// The last node in visible order
pub fn last_visible<T: TreeView>(tree: &T, expanded: &HashSet<T::Id>) -> Option<T::Id> {
    let last_root = tree.roots().pop()?;

    Some(last_visible_descendant(tree, expanded, last_root))
}
