//! # Document Mutations
//!
//! Structural edits on a [`Document`]. Every operation is pure: it borrows
//! the current document and returns a new one together with a selection
//! hint. On `Err` the caller keeps the document it already has, which makes
//! a failed mutation a no-op.
//!
//! ## Semantics
//!
//! ### Add
//! - Insertion index follows the child type: `Text` goes first, an
//!   `EmbedContainer` goes to index 1 (clamped to the current length) and
//!   comes with one `Embed`, everything else is appended
//! - Adding an accessory replaces the section's current accessory
//! - Illegal parent/child pairings are refused
//!
//! ### Delete
//! - Removes the node and its subtree
//! - Selection falls back to the next sibling, then the previous sibling,
//!   then the parent (the section, for an accessory)
//!
//! ### Move
//! - Swaps the *content* of two adjacent slots; both slot ids stay put
//! - Moving past either end is a no-op
//!
//! ### Switch root type
//! - Fresh empty root, settings carried over
//!
//! ### Update
//! - Replaces scalar fields of one component; children and accessory are kept

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{create_component, Component, ComponentKind, ComponentType, Document, RootType, SlotId};

/// Structural edits, as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    AddChild {
        parent_id: SlotId,
        child_type: ComponentType,
        as_accessory: bool,
    },
    Delete {
        target_id: SlotId,
    },
    MoveUp {
        target_id: SlotId,
    },
    MoveDown {
        target_id: SlotId,
    },
    SwitchRootType {
        root_type: RootType,
    },
    Update {
        target_id: SlotId,
        kind: ComponentKind,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(SlotId),

    #[error("Parent not found: {0}")]
    ParentNotFound(SlotId),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Cannot delete the message root")]
    CannotDeleteRoot,

    #[error("{0:?} can only be used as the message root")]
    RootNotInsertable(ComponentType),
}

impl MutationError {
    /// Raised because the caller held an id the document no longer has
    pub fn is_stale_reference(&self) -> bool {
        matches!(
            self,
            MutationError::NodeNotFound(_) | MutationError::ParentNotFound(_)
        )
    }
}

/// Result of a successful [`Mutation::apply`]
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub document: Document,

    /// Slot that should be selected next, if the mutation suggests one
    pub select: Option<SlotId>,

    /// Slots that should be expanded so the change is visible
    pub expand: Vec<SlotId>,
}

impl MutationOutcome {
    fn unchanged(document: Document) -> Self {
        Self {
            document,
            select: None,
            expand: Vec::new(),
        }
    }
}

impl Mutation {
    pub fn apply(&self, doc: &Document) -> Result<MutationOutcome, MutationError> {
        match self {
            Mutation::AddChild {
                parent_id,
                child_type,
                as_accessory,
            } => {
                let added = add_child(doc, parent_id, *child_type, *as_accessory)?;
                Ok(MutationOutcome {
                    document: added.document,
                    select: Some(added.created_id),
                    expand: added.expand_ids,
                })
            }

            Mutation::Delete { target_id } => {
                let deleted = delete_component(doc, target_id)?;
                Ok(MutationOutcome {
                    document: deleted.document,
                    select: Some(deleted.next_selected),
                    expand: Vec::new(),
                })
            }

            Mutation::MoveUp { target_id } => Ok(move_up(doc, target_id)?.into()),

            Mutation::MoveDown { target_id } => Ok(move_down(doc, target_id)?.into()),

            Mutation::SwitchRootType { root_type } => {
                let document = switch_root_type(doc, *root_type);
                let root_id = document.root_id().clone();
                Ok(MutationOutcome {
                    document,
                    select: Some(root_id.clone()),
                    expand: vec![root_id],
                })
            }

            Mutation::Update { target_id, kind } => Ok(MutationOutcome::unchanged(
                update_component(doc, target_id, kind.clone())?,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Added {
    pub document: Document,
    pub created_id: SlotId,

    /// The created node, any node created along with it, then the parent
    pub expand_ids: Vec<SlotId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deleted {
    pub document: Document,
    pub next_selected: SlotId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Moved {
    pub document: Document,

    /// Slot now holding the moved content; `None` when nothing moved
    pub swapped_slot: Option<SlotId>,
}

impl From<Moved> for MutationOutcome {
    fn from(moved: Moved) -> Self {
        Self {
            document: moved.document,
            select: moved.swapped_slot,
            expand: Vec::new(),
        }
    }
}

/// Create `child_type` under `parent_id`, as a child or as its accessory
pub fn add_child(
    doc: &Document,
    parent_id: &SlotId,
    child_type: ComponentType,
    as_accessory: bool,
) -> Result<Added, MutationError> {
    if child_type.is_root() {
        return Err(MutationError::RootNotInsertable(child_type));
    }

    let mut taken: HashSet<SlotId> = doc.ids().into_iter().collect();
    let mut document = doc.clone();
    let parent = document
        .root
        .find_mut(parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
    let parent_type = parent.component_type();

    if as_accessory {
        if !parent_type.accepts_accessory(child_type) {
            return Err(MutationError::InvalidStructure(format!(
                "{} cannot be the accessory of {}",
                child_type.label(),
                parent_type.label()
            )));
        }

        // Ids of the replaced accessory become free again
        if let Some(previous) = parent.accessory() {
            for id in previous.ids() {
                taken.remove(&id);
            }
        }

        let created = fresh_component(child_type, &parent_id.accessory_scope(), 0, &taken);
        let created_id = created.id.clone();

        if let Some(slot) = parent.accessory_mut() {
            *slot = Some(Box::new(created));
        }

        debug!(parent = %parent_id, created = %created_id, "added accessory");

        return Ok(Added {
            document,
            created_id: created_id.clone(),
            expand_ids: vec![created_id, parent_id.clone()],
        });
    }

    if !parent_type.accepts_child(child_type) {
        return Err(MutationError::InvalidStructure(format!(
            "{} cannot contain {}",
            parent_type.label(),
            child_type.label()
        )));
    }

    let children = parent.children_mut().ok_or_else(|| {
        MutationError::InvalidStructure(format!("{} has no children", parent_type.label()))
    })?;

    let index = match child_type {
        ComponentType::Text => 0,
        ComponentType::EmbedContainer => children.len().min(1),
        _ => children.len(),
    };

    let mut created = fresh_component(child_type, parent_id, index, &taken);
    taken.insert(created.id.clone());

    let mut expand_ids = vec![created.id.clone()];

    if child_type == ComponentType::EmbedContainer {
        let embed = fresh_component(ComponentType::Embed, &created.id, 0, &taken);
        expand_ids.push(embed.id.clone());

        if let Some(embeds) = created.children_mut() {
            embeds.push(embed);
        }
    }

    let created_id = created.id.clone();
    children.insert(index, created);
    expand_ids.push(parent_id.clone());

    debug!(parent = %parent_id, created = %created_id, index, "added child");

    Ok(Added {
        document,
        created_id,
        expand_ids,
    })
}

/// Remove `target_id` and its subtree
pub fn delete_component(doc: &Document, target_id: &SlotId) -> Result<Deleted, MutationError> {
    if target_id == doc.root_id() {
        return Err(MutationError::CannotDeleteRoot);
    }

    let parent_id = doc
        .parent_of(target_id)
        .map(|parent| parent.id.clone())
        .ok_or_else(|| MutationError::NodeNotFound(target_id.clone()))?;

    let mut document = doc.clone();
    let parent = document
        .root
        .find_mut(&parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;

    if let Some(slot) = parent.accessory_mut() {
        if slot.as_ref().map(|accessory| &accessory.id) == Some(target_id) {
            *slot = None;
            debug!(target = %target_id, "deleted accessory");

            return Ok(Deleted {
                document,
                next_selected: parent_id,
            });
        }
    }

    let children = parent
        .children_mut()
        .ok_or_else(|| MutationError::NodeNotFound(target_id.clone()))?;
    let index = children
        .iter()
        .position(|child| &child.id == target_id)
        .ok_or_else(|| MutationError::NodeNotFound(target_id.clone()))?;

    children.remove(index);

    let next_selected = children
        .get(index)
        .or_else(|| index.checked_sub(1).and_then(|previous| children.get(previous)))
        .map(|sibling| sibling.id.clone())
        .unwrap_or_else(|| parent_id.clone());

    debug!(target = %target_id, next = %next_selected, "deleted component");

    Ok(Deleted {
        document,
        next_selected,
    })
}

pub fn move_up(doc: &Document, target_id: &SlotId) -> Result<Moved, MutationError> {
    move_sibling(doc, target_id, Direction::Up)
}

pub fn move_down(doc: &Document, target_id: &SlotId) -> Result<Moved, MutationError> {
    move_sibling(doc, target_id, Direction::Down)
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}

fn move_sibling(
    doc: &Document,
    target_id: &SlotId,
    direction: Direction,
) -> Result<Moved, MutationError> {
    let unmoved = || Moved {
        document: doc.clone(),
        swapped_slot: None,
    };

    if !doc.contains(target_id) {
        return Err(MutationError::NodeNotFound(target_id.clone()));
    }

    let Some(parent_id) = doc.parent_of(target_id).map(|parent| parent.id.clone()) else {
        trace!(target = %target_id, "root cannot move");
        return Ok(unmoved());
    };

    let mut document = doc.clone();
    let Some(children) = document
        .root
        .find_mut(&parent_id)
        .and_then(|parent| parent.children_mut())
    else {
        return Ok(unmoved());
    };

    let Some(index) = children.iter().position(|child| &child.id == target_id) else {
        trace!(target = %target_id, "accessories have no siblings");
        return Ok(unmoved());
    };

    let other = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|next| *next < children.len()),
    };

    let Some(other) = other else {
        trace!(target = %target_id, ?direction, "already at the boundary");
        return Ok(unmoved());
    };

    let (low, high) = (index.min(other), index.max(other));
    let (head, tail) = children.split_at_mut(high);
    std::mem::swap(&mut head[low].kind, &mut tail[0].kind);

    let swapped_slot = children[other].id.clone();
    debug!(target = %target_id, swapped = %swapped_slot, "moved component");

    Ok(Moved {
        document,
        swapped_slot: Some(swapped_slot),
    })
}

/// Replace the root with an empty one of `root_type`, keeping settings
pub fn switch_root_type(doc: &Document, root_type: RootType) -> Document {
    if doc.root_type() == Some(root_type) {
        return doc.clone();
    }

    Document::new(root_type).with_settings(doc.settings.clone())
}

/// Replace the fields of `target_id` with those of `kind`
///
/// `kind` must be of the same variant as the component it replaces. Children
/// and accessory of the existing component are kept; those carried by
/// `kind` are ignored.
pub fn update_component(
    doc: &Document,
    target_id: &SlotId,
    kind: ComponentKind,
) -> Result<Document, MutationError> {
    let mut document = doc.clone();
    let target = document
        .root
        .find_mut(target_id)
        .ok_or_else(|| MutationError::NodeNotFound(target_id.clone()))?;

    if target.component_type() != kind.component_type() {
        return Err(MutationError::InvalidStructure(format!(
            "cannot update {} with {} fields",
            target.component_type().label(),
            kind.component_type().label()
        )));
    }

    let mut replacement = Component {
        id: target.id.clone(),
        kind,
    };

    if let (Some(current), Some(next)) = (target.children_mut(), replacement.children_mut()) {
        std::mem::swap(current, next);
    }

    if let (Some(current), Some(next)) = (target.accessory_mut(), replacement.accessory_mut()) {
        std::mem::swap(current, next);
    }

    *target = replacement;

    Ok(document)
}

/// First free id for `component_type` under `scope`, starting at `index`
///
/// Positional ids can collide once slots have been deleted and refilled, so
/// the index is bumped until the id is unused anywhere in the document.
fn fresh_component(
    component_type: ComponentType,
    scope: &SlotId,
    index: usize,
    taken: &HashSet<SlotId>,
) -> Component {
    let mut component = create_component(component_type, Some(scope), index);
    let mut next = index;

    while taken.contains(&component.id) {
        next += 1;
        component.id = SlotId::derive(Some(scope), component_type, next);
    }

    component
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy() -> Document {
        Document::new(RootType::Legacy)
    }

    fn root_children(doc: &Document) -> Vec<ComponentType> {
        doc.root
            .children()
            .iter()
            .map(Component::component_type)
            .collect()
    }

    #[test]
    fn test_text_then_embed_container_ordering() {
        let doc = legacy();
        let root = doc.root_id().clone();

        let doc = add_child(&doc, &root, ComponentType::Text, false)
            .unwrap()
            .document;
        let added = add_child(&doc, &root, ComponentType::EmbedContainer, false).unwrap();

        assert_eq!(
            root_children(&added.document),
            vec![ComponentType::Text, ComponentType::EmbedContainer]
        );

        let container = &added.document.root.children()[1];
        assert_eq!(container.children().len(), 1);
        assert_eq!(container.children()[0].component_type(), ComponentType::Embed);
        assert_eq!(
            added.expand_ids,
            vec![
                container.id.clone(),
                container.children()[0].id.clone(),
                added.document.root_id().clone()
            ]
        );
    }

    #[test]
    fn test_text_is_always_first() {
        let doc = legacy();
        let root = doc.root_id().clone();

        let doc = add_child(&doc, &root, ComponentType::LegacyActionRow, false)
            .unwrap()
            .document;
        let doc = add_child(&doc, &root, ComponentType::Text, false)
            .unwrap()
            .document;

        assert_eq!(
            root_children(&doc),
            vec![ComponentType::Text, ComponentType::LegacyActionRow]
        );
    }

    #[test]
    fn test_embed_container_into_empty_root_is_clamped() {
        let doc = legacy();
        let root = doc.root_id().clone();

        let added = add_child(&doc, &root, ComponentType::EmbedContainer, false).unwrap();
        assert_eq!(root_children(&added.document), vec![ComponentType::EmbedContainer]);
    }

    #[test]
    fn test_add_refuses_illegal_targets() {
        let doc = legacy();
        let root = doc.root_id().clone();

        assert!(matches!(
            add_child(&doc, &"missing".into(), ComponentType::Text, false),
            Err(MutationError::ParentNotFound(_))
        ));
        assert!(matches!(
            add_child(&doc, &root, ComponentType::TextDisplay, false),
            Err(MutationError::InvalidStructure(_))
        ));
        assert!(matches!(
            add_child(&doc, &root, ComponentType::Button, true),
            Err(MutationError::InvalidStructure(_))
        ));
        assert!(matches!(
            add_child(&doc, &root, ComponentType::V2Root, false),
            Err(MutationError::RootNotInsertable(ComponentType::V2Root))
        ));
    }

    #[test]
    fn test_accessory_replaces_previous() {
        let doc = Document::new(RootType::V2);
        let root = doc.root_id().clone();
        let added = add_child(&doc, &root, ComponentType::Section, false).unwrap();
        let section = added.created_id;

        let doc = add_child(&added.document, &section, ComponentType::Button, true)
            .unwrap()
            .document;
        let replaced = add_child(&doc, &section, ComponentType::Thumbnail, true).unwrap();

        let section = replaced.document.find(&section).unwrap();
        assert_eq!(
            section.accessory().map(Component::component_type),
            Some(ComponentType::Thumbnail)
        );
        assert_eq!(section.accessory().map(|a| &a.id), Some(&replaced.created_id));
    }

    #[test]
    fn test_ids_stay_unique_after_delete_and_refill() {
        let doc = legacy();
        let root = doc.root_id().clone();

        let first = add_child(&doc, &root, ComponentType::LegacyActionRow, false).unwrap();
        let second = add_child(&first.document, &root, ComponentType::LegacyActionRow, false)
            .unwrap();
        let doc = delete_component(&second.document, &first.created_id)
            .unwrap()
            .document;
        let third = add_child(&doc, &root, ComponentType::LegacyActionRow, false).unwrap();

        let ids = third.document.ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_ne!(third.created_id, second.created_id);
    }

    #[test]
    fn test_delete_selection_fallbacks() {
        let doc = legacy();
        let root = doc.root_id().clone();
        let a = add_child(&doc, &root, ComponentType::LegacyActionRow, false).unwrap();
        let b = add_child(&a.document, &root, ComponentType::LegacyActionRow, false).unwrap();
        let doc = b.document;

        let deleted = delete_component(&doc, &a.created_id).unwrap();
        assert_eq!(deleted.next_selected, b.created_id);

        let deleted = delete_component(&doc, &b.created_id).unwrap();
        assert_eq!(deleted.next_selected, a.created_id);

        let deleted = delete_component(&deleted.document, &a.created_id).unwrap();
        assert_eq!(deleted.next_selected, root);
    }

    #[test]
    fn test_delete_accessory_selects_section() {
        let doc = Document::new(RootType::V2);
        let root = doc.root_id().clone();
        let section = add_child(&doc, &root, ComponentType::Section, false).unwrap();
        let button =
            add_child(&section.document, &section.created_id, ComponentType::Button, true).unwrap();

        let deleted = delete_component(&button.document, &button.created_id).unwrap();
        assert_eq!(deleted.next_selected, section.created_id);
        assert!(!deleted.document.contains(&button.created_id));
    }

    #[test]
    fn test_delete_root_and_missing() {
        let doc = legacy();

        assert_eq!(
            delete_component(&doc, &doc.root_id().clone()),
            Err(MutationError::CannotDeleteRoot)
        );
        assert_eq!(
            delete_component(&doc, &"gone".into()),
            Err(MutationError::NodeNotFound("gone".into()))
        );
    }

    #[test]
    fn test_move_swaps_content_not_ids() {
        let doc = legacy();
        let root = doc.root_id().clone();
        let a = add_child(&doc, &root, ComponentType::LegacyActionRow, false).unwrap();
        let b = add_child(&a.document, &root, ComponentType::LegacyActionRow, false).unwrap();
        let with_button =
            add_child(&b.document, &b.created_id, ComponentType::LegacyButton, false).unwrap();

        let moved = move_up(&with_button.document, &b.created_id).unwrap();
        assert_eq!(moved.swapped_slot.as_ref(), Some(&a.created_id));

        let children = moved.document.root.children();
        assert_eq!(children[0].id, a.created_id);
        assert_eq!(children[1].id, b.created_id);
        assert_eq!(children[0].children().len(), 1);
        assert!(children[1].children().is_empty());
    }

    #[test]
    fn test_move_at_boundary_is_noop() {
        let doc = legacy();
        let root = doc.root_id().clone();
        let a = add_child(&doc, &root, ComponentType::LegacyActionRow, false).unwrap();

        let moved = move_up(&a.document, &a.created_id).unwrap();
        assert_eq!(moved.document, a.document);
        assert_eq!(moved.swapped_slot, None);

        let moved = move_down(&a.document, &a.created_id).unwrap();
        assert_eq!(moved.swapped_slot, None);

        assert!(move_down(&a.document, &"gone".into()).is_err());
    }

    #[test]
    fn test_switch_root_keeps_settings() {
        let mut doc = legacy();
        doc.settings.forum_thread_title = Some("{{title}}".to_string());
        let root = doc.root_id().clone();
        let doc = add_child(&doc, &root, ComponentType::Text, false)
            .unwrap()
            .document;

        let switched = switch_root_type(&doc, RootType::V2);
        assert_eq!(switched.root_type(), Some(RootType::V2));
        assert!(switched.root.children().is_empty());
        assert_eq!(switched.settings, doc.settings);

        assert_eq!(switch_root_type(&doc, RootType::Legacy), doc);
    }

    #[test]
    fn test_update_keeps_structure() {
        let doc = legacy();
        let root = doc.root_id().clone();
        let added = add_child(&doc, &root, ComponentType::EmbedContainer, false).unwrap();
        let embed_id = added.expand_ids[1].clone();

        let doc = update_component(
            &added.document,
            &embed_id,
            ComponentKind::Embed {
                color: Some(0xff0000),
                children: vec![],
            },
        )
        .unwrap();

        match &doc.find(&embed_id).unwrap().kind {
            ComponentKind::Embed { color, .. } => assert_eq!(*color, Some(0xff0000)),
            other => panic!("unexpected kind {:?}", other),
        }

        assert!(matches!(
            update_component(&doc, &embed_id, ComponentKind::empty(ComponentType::Text)),
            Err(MutationError::InvalidStructure(_))
        ));
        assert!(update_component(&doc, &"gone".into(), ComponentKind::empty(ComponentType::Text))
            .unwrap_err()
            .is_stale_reference());
    }

    #[test]
    fn test_apply_dispatches() {
        let doc = legacy();
        let outcome = Mutation::AddChild {
            parent_id: doc.root_id().clone(),
            child_type: ComponentType::Text,
            as_accessory: false,
        }
        .apply(&doc)
        .unwrap();

        assert_eq!(outcome.select, Some("legacy-root-text-0".into()));
        assert_eq!(
            outcome.expand,
            vec![SlotId::from("legacy-root-text-0"), SlotId::from("legacy-root")]
        );
    }
}
