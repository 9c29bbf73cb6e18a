//! Flat message payload as stored with a feed connection
//!
//! This is the shape that crosses the persistence boundary; see
//! [`crate::convert`] for the mapping to and from [`crate::Document`].

use serde::{Deserialize, Serialize};

use crate::{ForumThreadTag, Mentions, PlaceholderLimit, TimestampSource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default)]
    pub embeds: Vec<EmbedPayload>,

    /// Legacy button rows
    #[serde(default)]
    pub component_rows: Option<Vec<ComponentRow>>,

    /// Present and non-empty only for V2 messages
    #[serde(default, rename = "componentsV2")]
    pub components_v2: Option<Vec<V2Payload>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<Formatter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_placeholder_fallback: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_thread_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_thread_tags: Option<Vec<ForumThreadTag>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Mentions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_limits: Option<Vec<PlaceholderLimit>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_new_thread_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_new_thread_excludes_preview: Option<bool>,

    /// Read-only channel info; never written back
    #[serde(default, skip_serializing)]
    pub channel: Option<ChannelInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_tables: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_images: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_new_lines: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedPayload {
    /// Hex without `#`, e.g. `ff0000`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthorPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Title link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedFieldPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<UrlPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<UrlPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooterPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TimestampSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedAuthorPayload {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedFooterPayload {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFieldPayload {
    pub name: String,
    pub value: String,

    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPayload {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub components: Vec<RowButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowButton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Discord component type; always 2 (button)
    #[serde(rename = "type", default = "button_type")]
    pub kind: u8,

    #[serde(default)]
    pub label: String,

    #[serde(default = "link_style")]
    pub style: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub disabled: bool,
}

fn button_type() -> u8 {
    2
}

fn link_style() -> u8 {
    5
}

fn default_true() -> bool {
    true
}

fn default_spacing() -> u8 {
    1
}

/// A V2 component as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum V2Payload {
    TextDisplay {
        #[serde(default)]
        content: String,
    },
    Button {
        style: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default)]
        disabled: bool,
    },
    Thumbnail {
        media: UrlPayload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default)]
        spoiler: bool,
    },
    Section {
        #[serde(default)]
        components: Vec<V2Payload>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accessory: Option<Box<V2Payload>>,
    },
    ActionRow {
        #[serde(default)]
        components: Vec<V2Payload>,
    },
    Separator {
        #[serde(default = "default_true")]
        divider: bool,
        #[serde(default = "default_spacing")]
        spacing: u8,
    },
    Container {
        #[serde(default)]
        components: Vec<V2Payload>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accent_color: Option<u32>,
        #[serde(default)]
        spoiler: bool,
    },
    MediaGallery {
        #[serde(default)]
        items: Vec<MediaGalleryItemPayload>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaGalleryItemPayload {
    pub media: UrlPayload,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub spoiler: bool,
}

impl ConnectionDetails {
    pub fn is_v2(&self) -> bool {
        self.components_v2
            .as_ref()
            .map_or(false, |components| !components.is_empty())
    }
}
