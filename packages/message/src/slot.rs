use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ComponentType;

/// Identifier of a *position* in the component tree
///
/// A slot id names where a component sits, not which component sits there.
/// Moving a component up or down swaps the content of two slots while each
/// slot keeps its id, so anything holding "the selected id" keeps pointing at
/// the same visual position after a move.
///
/// Ids are derived from the parent slot, the component type and a position
/// index when a component is created (see [`crate::create_component`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id for a component of `component_type` created at `index` under `parent`
    pub fn derive(parent: Option<&SlotId>, component_type: ComponentType, index: usize) -> Self {
        match parent {
            Some(parent) => Self(format!("{}-{}-{}", parent.0, component_type.slug(), index)),
            None => Self(component_type.slug().to_string()),
        }
    }

    /// Scope under which a section's accessory ids are derived
    pub fn accessory_scope(&self) -> Self {
        Self(format!("{}-accessory", self.0))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SlotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_ids() {
        let root = SlotId::derive(None, ComponentType::LegacyRoot, 0);
        assert_eq!(root.as_str(), "legacy-root");

        let text = SlotId::derive(Some(&root), ComponentType::Text, 0);
        assert_eq!(text.as_str(), "legacy-root-text-0");

        let accessory = SlotId::derive(Some(&text.accessory_scope()), ComponentType::Button, 0);
        assert_eq!(accessory.as_str(), "legacy-root-text-0-accessory-button-0");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SlotId::new("v2-root-section-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""v2-root-section-1""#);
    }
}
