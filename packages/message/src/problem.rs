use serde::{Deserialize, Serialize};

use crate::SlotId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks saving
    Error,
    Warning,
}

/// A validation finding attached to one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Human-readable message
    pub message: String,

    /// Form path of the offending field, e.g. `messageComponent.children[0].content`
    pub path: String,

    /// Component to navigate to when the problem is picked
    pub component_id: SlotId,

    pub severity: Severity,
}

impl Problem {
    pub fn error(message: impl Into<String>, path: impl Into<String>, component_id: SlotId) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            component_id,
            severity: Severity::Error,
        }
    }

    pub fn warning(
        message: impl Into<String>,
        path: impl Into<String>,
        component_id: SlotId,
    ) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            component_id,
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
