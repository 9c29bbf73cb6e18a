use serde::{Deserialize, Serialize};

/// Session behaviour switches, read from the `builder` section of the config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderOptions {
    /// Expand components (and the embed created with a container) when added
    pub expand_created_components: bool,

    /// Re-run validation after every change instead of only on save
    pub validate_on_change: bool,

    /// Treat warnings like errors when saving
    pub warnings_block_save: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            expand_created_components: true,
            validate_on_change: true,
            warnings_block_save: false,
        }
    }
}
