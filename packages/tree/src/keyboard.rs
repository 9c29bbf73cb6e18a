use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Keys the tree reacts to
///
/// Parsed from DOM `KeyboardEvent.key` values; anything else is [`Key::Other`]
/// and passes through the reducer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Other,
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        })
    }
}

/// What the caller should do after a key went through the reducer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyResponse<Id> {
    /// Not a tree key; let the host handle it
    Ignored,

    /// State may have changed; suppress the default action
    Handled,

    /// Enter/Space on the focused node
    Activate(Id),

    /// Escape on the focused node
    Escape(Id),
}

impl<Id> KeyResponse<Id> {
    /// Whether the key event should be marked consumed (default prevented)
    pub fn is_consumed(&self) -> bool {
        !matches!(self, KeyResponse::Ignored)
    }
}
