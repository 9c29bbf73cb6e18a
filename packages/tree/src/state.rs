//! # Tree interaction state
//!
//! Focus, selection and expansion for one open tree, plus the keyboard
//! reducer that moves them around.
//!
//! The state is a plain value: the reducer takes it by value and hands back
//! the next state together with a [`KeyResponse`]. Per-node flags
//! ([`NodeView`]) are derived on demand and never stored.
//!
//! Focusing a node always selects it too. Selection alone (without focus)
//! only happens through [`TreeInteractionState::select`], used for
//! programmatic jumps such as "go to the component with this problem".

use std::collections::HashSet;
use std::hash::Hash;

use crate::keyboard::{Key, KeyResponse};
use crate::traversal::{
    first_visible, first_visible_child, last_visible, next_visible, previous_visible, TreeView,
};

/// Derived per-node flags for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeView {
    pub is_expanded: bool,
    pub is_focused: bool,
    pub is_selected: bool,

    /// Roving tabindex: exactly one node in the tree is reachable with Tab
    pub is_tabbable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeInteractionState<Id: Eq + Hash> {
    focused_id: Option<Id>,
    selected_id: Option<Id>,
    expanded_ids: HashSet<Id>,
}

impl<Id: Clone + Eq + Hash> TreeInteractionState<Id> {
    pub fn new() -> Self {
        Self {
            focused_id: None,
            selected_id: None,
            expanded_ids: HashSet::new(),
        }
    }

    pub fn with_expanded(mut self, ids: impl IntoIterator<Item = Id>) -> Self {
        self.expand_all(ids);
        self
    }

    pub fn with_focus(mut self, id: Id) -> Self {
        self.focus(id);
        self
    }

    pub fn focused_id(&self) -> Option<&Id> {
        self.focused_id.as_ref()
    }

    pub fn selected_id(&self) -> Option<&Id> {
        self.selected_id.as_ref()
    }

    pub fn expanded_ids(&self) -> &HashSet<Id> {
        &self.expanded_ids
    }

    pub fn is_expanded(&self, id: &Id) -> bool {
        self.expanded_ids.contains(id)
    }

    pub fn is_focused(&self, id: &Id) -> bool {
        self.focused_id.as_ref() == Some(id)
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected_id.as_ref() == Some(id)
    }

    /// Focus `id` and select it
    pub fn focus(&mut self, id: Id) {
        self.selected_id = Some(id.clone());
        self.focused_id = Some(id);
    }

    /// Drop focus; selection stays
    pub fn blur(&mut self) {
        self.focused_id = None;
    }

    /// Select `id` without moving focus
    pub fn select(&mut self, id: Id) {
        self.selected_id = Some(id);
    }

    pub fn set_expanded(&mut self, id: Id, expanded: bool) {
        if expanded {
            self.expanded_ids.insert(id);
        } else {
            self.expanded_ids.remove(&id);
        }
    }

    pub fn expand_all(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.expanded_ids.extend(ids);
    }

    /// Replace the expansion set wholesale
    pub fn reset_expanded(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.expanded_ids = ids.into_iter().collect();
    }

    /// Flags for one node; the first top-level node is the designated
    /// tab stop while nothing is selected
    pub fn node_view<T>(&self, tree: &T, id: &Id) -> NodeView
    where
        T: TreeView<Id = Id>,
    {
        let is_selected = self.is_selected(id);
        let is_tabbable = match &self.selected_id {
            Some(_) => is_selected,
            None => first_visible(tree).as_ref() == Some(id),
        };

        NodeView {
            is_expanded: self.is_expanded(id),
            is_focused: self.is_focused(id),
            is_selected,
            is_tabbable,
        }
    }

    /// Run one key press against the focused node
    ///
    /// Without a focused node every key is ignored. Navigation keys that
    /// find nothing to move to (e.g. ArrowDown on the last node) are still
    /// consumed.
    pub fn handle_key<T>(mut self, tree: &T, key: Key) -> (Self, KeyResponse<Id>)
    where
        T: TreeView<Id = Id>,
    {
        let Some(focused) = self.focused_id.clone() else {
            return (self, KeyResponse::Ignored);
        };

        let target = match key {
            Key::ArrowRight => {
                if self.is_expanded(&focused) {
                    first_visible_child(tree, &focused)
                } else {
                    self.expanded_ids.insert(focused.clone());
                    None
                }
            }
            Key::ArrowLeft => {
                if self.is_expanded(&focused) {
                    self.expanded_ids.remove(&focused);
                    None
                } else {
                    tree.parent(&focused)
                }
            }
            Key::ArrowDown => next_visible(tree, &self.expanded_ids, &focused),
            Key::ArrowUp => previous_visible(tree, &self.expanded_ids, &focused),
            Key::Home => first_visible(tree),
            Key::End => last_visible(tree, &self.expanded_ids),
            Key::Enter | Key::Space => return (self, KeyResponse::Activate(focused)),
            Key::Escape => return (self, KeyResponse::Escape(focused)),
            Key::Other => return (self, KeyResponse::Ignored),
        };

        if let Some(target) = target {
            self.focus(target);
        }

        (self, KeyResponse::Handled)
    }
}

impl<Id: Clone + Eq + Hash> Default for TreeInteractionState<Id> {
    fn default() -> Self {
        Self::new()
    }
}
