use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings that belong to the message rather than to any component
///
/// They survive a root type switch untouched. Everything is optional so that
/// an unset flag round-trips as "unset" rather than as `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Mentions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_limits: Option<Vec<PlaceholderLimit>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_thread_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_thread_tags: Option<Vec<ForumThreadTag>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_forum_channel: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_new_thread_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_new_thread_excludes_preview: Option<bool>,

    // Content formatting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_tables: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_images: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_new_lines: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_placeholder_fallback: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mentions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<MentionTarget>>,
}

/// A user or role mentioned when an article matches `filters`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionTarget {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: MentionKind,

    /// Filter expression, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    User,
    Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumThreadTag {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
}

/// Truncation rule for one placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderLimit {
    pub placeholder: String,
    pub character_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append_string: Option<String>,
}
