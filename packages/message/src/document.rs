use serde::{Deserialize, Serialize};

use crate::{create_component, Component, ComponentType, RootSettings, SlotId};

/// Which flavour of message a document composes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootType {
    Legacy,
    V2,
}

impl RootType {
    pub fn component_type(self) -> ComponentType {
        match self {
            RootType::Legacy => ComponentType::LegacyRoot,
            RootType::V2 => ComponentType::V2Root,
        }
    }
}

/// A composed message: one root component plus message-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub root: Component,

    #[serde(default)]
    pub settings: RootSettings,
}

impl Document {
    /// An empty document of the given root type
    pub fn new(root_type: RootType) -> Self {
        Self {
            root: create_component(root_type.component_type(), None, 0),
            settings: RootSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RootSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Root type, or `None` when the root slot holds a non-root component
    pub fn root_type(&self) -> Option<RootType> {
        match self.root.component_type() {
            ComponentType::LegacyRoot => Some(RootType::Legacy),
            ComponentType::V2Root => Some(RootType::V2),
            _ => None,
        }
    }

    pub fn root_id(&self) -> &SlotId {
        &self.root.id
    }

    pub fn find(&self, id: &SlotId) -> Option<&Component> {
        self.root.find(id)
    }

    pub fn contains(&self, id: &SlotId) -> bool {
        self.root.contains(id)
    }

    /// Every slot id, in document order
    pub fn ids(&self) -> Vec<SlotId> {
        self.root.ids()
    }

    /// Ids of the components enclosing `id`, outermost first
    pub fn ancestor_ids(&self, id: &SlotId) -> Option<Vec<SlotId>> {
        self.root.ancestor_ids(id)
    }

    /// Form path of `id` rooted at `messageComponent`
    pub fn path_of(&self, id: &SlotId) -> Option<String> {
        self.root.path_of(id, crate::ROOT_PATH)
    }

    /// The component holding `id` in its `children` or accessory slot
    pub fn parent_of(&self, id: &SlotId) -> Option<&Component> {
        self.ancestor_ids(id)?
            .last()
            .and_then(|parent_id| self.find(parent_id))
    }
}
