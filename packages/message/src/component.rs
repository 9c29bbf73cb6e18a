//! # Component Tree
//!
//! The typed tree a composed message is made of.
//!
//! A [`Component`] pairs a [`SlotId`] (where it sits) with a
//! [`ComponentKind`] (what it is). Every variant of the closed
//! [`ComponentType`] set has a fixed shape:
//!
//! - containers own an ordered `children` list
//! - `Section` additionally owns one optional `accessory`
//! - leaves only carry scalar fields
//!
//! Which child types a container accepts is answered by
//! [`ComponentType::accepts_child`]; cardinality limits (e.g. at most five
//! buttons in an action row) are left to the validator so that editing can
//! pass through temporarily out-of-range shapes.

use serde::{Deserialize, Serialize};

use crate::SlotId;

/// Closed set of component variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    LegacyRoot,
    V2Root,
    Text,
    EmbedContainer,
    Embed,
    EmbedAuthor,
    EmbedTitle,
    EmbedDescription,
    EmbedImage,
    EmbedThumbnail,
    EmbedFooter,
    EmbedField,
    EmbedTimestamp,
    LegacyActionRow,
    LegacyButton,
    ActionRow,
    Button,
    TextDisplay,
    Section,
    Thumbnail,
    Divider,
    Container,
    MediaGallery,
    MediaGalleryItem,
}

impl ComponentType {
    /// Human-readable name, used in messages shown to users
    pub fn label(self) -> &'static str {
        match self {
            ComponentType::LegacyRoot => "Discord Message",
            ComponentType::V2Root => "Discord Message",
            ComponentType::Text => "Text",
            ComponentType::EmbedContainer => "Embeds",
            ComponentType::Embed => "Embed",
            ComponentType::EmbedAuthor => "Embed Author",
            ComponentType::EmbedTitle => "Embed Title",
            ComponentType::EmbedDescription => "Embed Description",
            ComponentType::EmbedImage => "Embed Image",
            ComponentType::EmbedThumbnail => "Embed Thumbnail",
            ComponentType::EmbedFooter => "Embed Footer",
            ComponentType::EmbedField => "Embed Field",
            ComponentType::EmbedTimestamp => "Embed Timestamp",
            ComponentType::LegacyActionRow => "Action Row",
            ComponentType::LegacyButton => "Button",
            ComponentType::ActionRow => "Action Row",
            ComponentType::Button => "Button",
            ComponentType::TextDisplay => "Text Display",
            ComponentType::Section => "Section",
            ComponentType::Thumbnail => "Thumbnail",
            ComponentType::Divider => "Divider",
            ComponentType::Container => "Container",
            ComponentType::MediaGallery => "Media Gallery",
            ComponentType::MediaGalleryItem => "Media Gallery Item",
        }
    }

    /// Short lowercase token used when deriving slot ids
    pub fn slug(self) -> &'static str {
        match self {
            ComponentType::LegacyRoot => "legacy-root",
            ComponentType::V2Root => "v2-root",
            ComponentType::Text => "text",
            ComponentType::EmbedContainer => "embed-container",
            ComponentType::Embed => "embed",
            ComponentType::EmbedAuthor => "embed-author",
            ComponentType::EmbedTitle => "embed-title",
            ComponentType::EmbedDescription => "embed-description",
            ComponentType::EmbedImage => "embed-image",
            ComponentType::EmbedThumbnail => "embed-thumbnail",
            ComponentType::EmbedFooter => "embed-footer",
            ComponentType::EmbedField => "embed-field",
            ComponentType::EmbedTimestamp => "embed-timestamp",
            ComponentType::LegacyActionRow => "legacy-action-row",
            ComponentType::LegacyButton => "legacy-button",
            ComponentType::ActionRow => "action-row",
            ComponentType::Button => "button",
            ComponentType::TextDisplay => "text-display",
            ComponentType::Section => "section",
            ComponentType::Thumbnail => "thumbnail",
            ComponentType::Divider => "divider",
            ComponentType::Container => "container",
            ComponentType::MediaGallery => "media-gallery",
            ComponentType::MediaGalleryItem => "media-gallery-item",
        }
    }

    /// Discord API component type number, for V2 components that have one
    pub fn discord_type(self) -> Option<u8> {
        match self {
            ComponentType::ActionRow => Some(1),
            ComponentType::Button => Some(2),
            ComponentType::Section => Some(9),
            ComponentType::TextDisplay => Some(10),
            ComponentType::Thumbnail => Some(11),
            ComponentType::MediaGallery => Some(12),
            ComponentType::Divider => Some(14),
            ComponentType::Container => Some(17),
            _ => None,
        }
    }

    pub fn is_root(self) -> bool {
        matches!(self, ComponentType::LegacyRoot | ComponentType::V2Root)
    }

    /// Whether this variant owns a `children` list at all
    pub fn admits_children(self) -> bool {
        matches!(
            self,
            ComponentType::LegacyRoot
                | ComponentType::V2Root
                | ComponentType::EmbedContainer
                | ComponentType::Embed
                | ComponentType::LegacyActionRow
                | ComponentType::ActionRow
                | ComponentType::Section
                | ComponentType::Container
                | ComponentType::MediaGallery
        )
    }

    /// Whether `child` may appear in this variant's `children`
    pub fn accepts_child(self, child: ComponentType) -> bool {
        use ComponentType::*;

        match self {
            LegacyRoot => matches!(child, Text | EmbedContainer | LegacyActionRow),
            EmbedContainer => child == Embed,
            Embed => matches!(
                child,
                EmbedAuthor
                    | EmbedTitle
                    | EmbedDescription
                    | EmbedImage
                    | EmbedThumbnail
                    | EmbedFooter
                    | EmbedField
                    | EmbedTimestamp
            ),
            LegacyActionRow => child == LegacyButton,
            V2Root => matches!(
                child,
                TextDisplay | ActionRow | Section | Divider | Container | MediaGallery
            ),
            ActionRow => child == Button,
            Section => child == TextDisplay,
            Container => matches!(
                child,
                TextDisplay | ActionRow | Section | Divider | MediaGallery
            ),
            MediaGallery => child == MediaGalleryItem,
            _ => false,
        }
    }

    /// Whether `accessory` may be attached as this variant's accessory
    pub fn accepts_accessory(self, accessory: ComponentType) -> bool {
        self == ComponentType::Section
            && matches!(accessory, ComponentType::Button | ComponentType::Thumbnail)
    }
}

/// Visual style of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
}

impl ButtonStyle {
    /// Discord API style number
    pub fn number(self) -> u8 {
        match self {
            ButtonStyle::Primary => 1,
            ButtonStyle::Secondary => 2,
            ButtonStyle::Success => 3,
            ButtonStyle::Danger => 4,
            ButtonStyle::Link => 5,
        }
    }

    /// Unknown numbers fall back to `Primary`
    pub fn from_number(number: u8) -> Self {
        match number {
            2 => ButtonStyle::Secondary,
            3 => ButtonStyle::Success,
            4 => ButtonStyle::Danger,
            5 => ButtonStyle::Link,
            _ => ButtonStyle::Primary,
        }
    }
}

/// Where an embed timestamp comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    Article,
    Now,
}

/// Content of a slot
///
/// Swapping two `ComponentKind`s between slots is how components move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ComponentKind {
    LegacyRoot {
        #[serde(default)]
        children: Vec<Component>,
    },
    V2Root {
        #[serde(default)]
        children: Vec<Component>,
    },
    Text {
        content: String,
    },
    EmbedContainer {
        #[serde(default)]
        children: Vec<Component>,
    },
    Embed {
        color: Option<u32>,
        #[serde(default)]
        children: Vec<Component>,
    },
    EmbedAuthor {
        author_name: String,
        author_url: Option<String>,
        author_icon_url: Option<String>,
    },
    EmbedTitle {
        title: String,
        title_url: Option<String>,
    },
    EmbedDescription {
        description: String,
    },
    EmbedImage {
        image_url: String,
    },
    EmbedThumbnail {
        thumbnail_url: String,
    },
    EmbedFooter {
        footer_text: String,
        footer_icon_url: Option<String>,
    },
    EmbedField {
        field_name: String,
        field_value: String,
        #[serde(default)]
        inline: bool,
    },
    EmbedTimestamp {
        timestamp: Option<TimestampSource>,
    },
    LegacyActionRow {
        #[serde(default)]
        children: Vec<Component>,
    },
    LegacyButton {
        label: String,
        style: ButtonStyle,
        #[serde(default)]
        disabled: bool,
        url: String,
    },
    ActionRow {
        #[serde(default)]
        children: Vec<Component>,
    },
    Button {
        label: String,
        style: ButtonStyle,
        #[serde(default)]
        disabled: bool,
        href: Option<String>,
    },
    TextDisplay {
        content: String,
    },
    Section {
        #[serde(default)]
        children: Vec<Component>,
        accessory: Option<Box<Component>>,
    },
    Thumbnail {
        media_url: String,
        description: Option<String>,
        #[serde(default)]
        spoiler: bool,
    },
    Divider {
        visual: bool,
        spacing: u8,
    },
    Container {
        #[serde(default)]
        children: Vec<Component>,
        accent_color: Option<u32>,
        #[serde(default)]
        spoiler: bool,
    },
    MediaGallery {
        #[serde(default)]
        children: Vec<Component>,
    },
    MediaGalleryItem {
        media_url: String,
        description: Option<String>,
        #[serde(default)]
        spoiler: bool,
    },
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::LegacyRoot { .. } => ComponentType::LegacyRoot,
            ComponentKind::V2Root { .. } => ComponentType::V2Root,
            ComponentKind::Text { .. } => ComponentType::Text,
            ComponentKind::EmbedContainer { .. } => ComponentType::EmbedContainer,
            ComponentKind::Embed { .. } => ComponentType::Embed,
            ComponentKind::EmbedAuthor { .. } => ComponentType::EmbedAuthor,
            ComponentKind::EmbedTitle { .. } => ComponentType::EmbedTitle,
            ComponentKind::EmbedDescription { .. } => ComponentType::EmbedDescription,
            ComponentKind::EmbedImage { .. } => ComponentType::EmbedImage,
            ComponentKind::EmbedThumbnail { .. } => ComponentType::EmbedThumbnail,
            ComponentKind::EmbedFooter { .. } => ComponentType::EmbedFooter,
            ComponentKind::EmbedField { .. } => ComponentType::EmbedField,
            ComponentKind::EmbedTimestamp { .. } => ComponentType::EmbedTimestamp,
            ComponentKind::LegacyActionRow { .. } => ComponentType::LegacyActionRow,
            ComponentKind::LegacyButton { .. } => ComponentType::LegacyButton,
            ComponentKind::ActionRow { .. } => ComponentType::ActionRow,
            ComponentKind::Button { .. } => ComponentType::Button,
            ComponentKind::TextDisplay { .. } => ComponentType::TextDisplay,
            ComponentKind::Section { .. } => ComponentType::Section,
            ComponentKind::Thumbnail { .. } => ComponentType::Thumbnail,
            ComponentKind::Divider { .. } => ComponentType::Divider,
            ComponentKind::Container { .. } => ComponentType::Container,
            ComponentKind::MediaGallery { .. } => ComponentType::MediaGallery,
            ComponentKind::MediaGalleryItem { .. } => ComponentType::MediaGalleryItem,
        }
    }

    /// Default content for a freshly created component
    pub fn empty(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::LegacyRoot => ComponentKind::LegacyRoot { children: vec![] },
            ComponentType::V2Root => ComponentKind::V2Root { children: vec![] },
            ComponentType::Text => ComponentKind::Text {
                content: String::new(),
            },
            ComponentType::EmbedContainer => ComponentKind::EmbedContainer { children: vec![] },
            ComponentType::Embed => ComponentKind::Embed {
                color: None,
                children: vec![],
            },
            ComponentType::EmbedAuthor => ComponentKind::EmbedAuthor {
                author_name: String::new(),
                author_url: None,
                author_icon_url: None,
            },
            ComponentType::EmbedTitle => ComponentKind::EmbedTitle {
                title: String::new(),
                title_url: None,
            },
            ComponentType::EmbedDescription => ComponentKind::EmbedDescription {
                description: String::new(),
            },
            ComponentType::EmbedImage => ComponentKind::EmbedImage {
                image_url: String::new(),
            },
            ComponentType::EmbedThumbnail => ComponentKind::EmbedThumbnail {
                thumbnail_url: String::new(),
            },
            ComponentType::EmbedFooter => ComponentKind::EmbedFooter {
                footer_text: String::new(),
                footer_icon_url: None,
            },
            ComponentType::EmbedField => ComponentKind::EmbedField {
                field_name: String::new(),
                field_value: String::new(),
                inline: false,
            },
            ComponentType::EmbedTimestamp => ComponentKind::EmbedTimestamp { timestamp: None },
            ComponentType::LegacyActionRow => ComponentKind::LegacyActionRow { children: vec![] },
            ComponentType::LegacyButton => ComponentKind::LegacyButton {
                label: String::new(),
                style: ButtonStyle::Link,
                disabled: false,
                url: String::new(),
            },
            ComponentType::ActionRow => ComponentKind::ActionRow { children: vec![] },
            ComponentType::Button => ComponentKind::Button {
                label: String::new(),
                style: ButtonStyle::Primary,
                disabled: false,
                href: None,
            },
            ComponentType::TextDisplay => ComponentKind::TextDisplay {
                content: String::new(),
            },
            ComponentType::Section => ComponentKind::Section {
                children: vec![],
                accessory: None,
            },
            ComponentType::Thumbnail => ComponentKind::Thumbnail {
                media_url: String::new(),
                description: None,
                spoiler: false,
            },
            ComponentType::Divider => ComponentKind::Divider {
                visual: true,
                spacing: 1,
            },
            ComponentType::Container => ComponentKind::Container {
                children: vec![],
                accent_color: None,
                spoiler: false,
            },
            ComponentType::MediaGallery => ComponentKind::MediaGallery { children: vec![] },
            ComponentType::MediaGalleryItem => ComponentKind::MediaGalleryItem {
                media_url: String::new(),
                description: None,
                spoiler: false,
            },
        }
    }
}

/// A node of the message tree: a slot id plus its content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: SlotId,

    #[serde(flatten)]
    pub kind: ComponentKind,
}

/// Create a component with default content at `index` under `parent`
///
/// Roots are created with `parent = None`.
pub fn create_component(
    component_type: ComponentType,
    parent: Option<&SlotId>,
    index: usize,
) -> Component {
    Component {
        id: SlotId::derive(parent, component_type, index),
        kind: ComponentKind::empty(component_type),
    }
}

impl Component {
    pub fn new(id: impl Into<SlotId>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    /// Ordered children; empty for variants without a children list
    pub fn children(&self) -> &[Component] {
        match &self.kind {
            ComponentKind::LegacyRoot { children }
            | ComponentKind::V2Root { children }
            | ComponentKind::EmbedContainer { children }
            | ComponentKind::Embed { children, .. }
            | ComponentKind::LegacyActionRow { children }
            | ComponentKind::ActionRow { children }
            | ComponentKind::Section { children, .. }
            | ComponentKind::Container { children, .. }
            | ComponentKind::MediaGallery { children } => children,
            _ => &[],
        }
    }

    /// Mutable children list, `None` for variants without one
    pub fn children_mut(&mut self) -> Option<&mut Vec<Component>> {
        match &mut self.kind {
            ComponentKind::LegacyRoot { children }
            | ComponentKind::V2Root { children }
            | ComponentKind::EmbedContainer { children }
            | ComponentKind::Embed { children, .. }
            | ComponentKind::LegacyActionRow { children }
            | ComponentKind::ActionRow { children }
            | ComponentKind::Section { children, .. }
            | ComponentKind::Container { children, .. }
            | ComponentKind::MediaGallery { children } => Some(children),
            _ => None,
        }
    }

    pub fn accessory(&self) -> Option<&Component> {
        match &self.kind {
            ComponentKind::Section { accessory, .. } => accessory.as_deref(),
            _ => None,
        }
    }

    /// The accessory slot itself, `None` for anything but a section
    pub fn accessory_mut(&mut self) -> Option<&mut Option<Box<Component>>> {
        match &mut self.kind {
            ComponentKind::Section { accessory, .. } => Some(accessory),
            _ => None,
        }
    }

    /// Children followed by the accessory, if any
    pub fn nested(&self) -> impl Iterator<Item = &Component> {
        self.children().iter().chain(self.accessory())
    }

    pub fn find(&self, id: &SlotId) -> Option<&Component> {
        if &self.id == id {
            return Some(self);
        }

        self.nested().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &SlotId) -> Option<&mut Component> {
        if &self.id == id {
            return Some(self);
        }

        if self.children().iter().any(|child| child.contains(id)) {
            return self
                .children_mut()?
                .iter_mut()
                .find_map(|child| child.find_mut(id));
        }

        match self.accessory_mut() {
            Some(Some(accessory)) => accessory.find_mut(id),
            _ => None,
        }
    }

    pub fn contains(&self, id: &SlotId) -> bool {
        self.find(id).is_some()
    }

    /// Every id in the subtree, in document order
    pub fn ids(&self) -> Vec<SlotId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<SlotId>) {
        ids.push(self.id.clone());

        for child in self.nested() {
            child.collect_ids(ids);
        }
    }

    /// Ids from this component down to (excluding) `id`
    ///
    /// `None` when `id` is not in the subtree.
    pub fn ancestor_ids(&self, id: &SlotId) -> Option<Vec<SlotId>> {
        if &self.id == id {
            return Some(Vec::new());
        }

        self.nested().find_map(|child| {
            child.ancestor_ids(id).map(|mut rest| {
                rest.insert(0, self.id.clone());
                rest
            })
        })
    }

    /// Navigation path of `id` relative to this component, rooted at `base`
    ///
    /// e.g. `messageComponent.children[1].accessory`
    pub fn path_of(&self, id: &SlotId, base: &str) -> Option<String> {
        if &self.id == id {
            return Some(base.to_string());
        }

        for (index, child) in self.children().iter().enumerate() {
            if let Some(path) = child.path_of(id, &format!("{}.children[{}]", base, index)) {
                return Some(path);
            }
        }

        self.accessory()
            .and_then(|accessory| accessory.path_of(id, &format!("{}.accessory", base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_with_button() -> Component {
        let mut section = create_component(ComponentType::Section, Some(&"root".into()), 0);
        let text = create_component(ComponentType::TextDisplay, Some(&section.id), 0);
        let button = create_component(ComponentType::Button, Some(&section.id.accessory_scope()), 0);

        if let ComponentKind::Section {
            children,
            accessory,
        } = &mut section.kind
        {
            children.push(text);
            *accessory = Some(Box::new(button));
        }

        section
    }

    #[test]
    fn test_create_component_defaults() {
        let text = create_component(ComponentType::Text, Some(&"root".into()), 0);
        assert_eq!(text.id.as_str(), "root-text-0");
        assert_eq!(
            text.kind,
            ComponentKind::Text {
                content: String::new()
            }
        );

        let button = create_component(ComponentType::LegacyButton, Some(&"row".into()), 2);
        match button.kind {
            ComponentKind::LegacyButton { style, .. } => assert_eq!(style, ButtonStyle::Link),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_shape_rules() {
        assert!(ComponentType::LegacyRoot.accepts_child(ComponentType::Text));
        assert!(!ComponentType::LegacyRoot.accepts_child(ComponentType::TextDisplay));
        assert!(ComponentType::Section.accepts_accessory(ComponentType::Thumbnail));
        assert!(!ComponentType::Section.accepts_accessory(ComponentType::TextDisplay));
        assert!(!ComponentType::Container.accepts_accessory(ComponentType::Button));
        assert!(!ComponentType::Button.admits_children());
    }

    #[test]
    fn test_find_reaches_accessory() {
        let section = section_with_button();
        let accessory_id = SlotId::new("root-section-0-accessory-button-0");

        assert_eq!(
            section.find(&accessory_id).map(|c| c.component_type()),
            Some(ComponentType::Button)
        );
        assert_eq!(section.ids().len(), 3);
    }

    #[test]
    fn test_find_mut_edits_child_and_accessory() {
        let mut section = section_with_button();
        let text_id = SlotId::new("root-section-0-text-display-0");
        let accessory_id = SlotId::new("root-section-0-accessory-button-0");

        if let Some(ComponentKind::TextDisplay { content }) =
            section.find_mut(&text_id).map(|c| &mut c.kind)
        {
            *content = "edited".to_string();
        }
        if let Some(ComponentKind::Button { label, .. }) =
            section.find_mut(&accessory_id).map(|c| &mut c.kind)
        {
            *label = "Read more".to_string();
        }

        assert_eq!(
            section.find(&text_id).map(|c| &c.kind),
            Some(&ComponentKind::TextDisplay {
                content: "edited".to_string()
            })
        );
        assert!(matches!(
            section.find(&accessory_id).map(|c| &c.kind),
            Some(ComponentKind::Button { label, .. }) if label == "Read more"
        ));
        assert!(section.find_mut(&"missing".into()).is_none());
        let own_id = section.id.clone();
        assert!(section.find_mut(&own_id).is_some());
    }

    #[test]
    fn test_paths_and_ancestors() {
        let section = section_with_button();
        let text_id = SlotId::new("root-section-0-text-display-0");
        let accessory_id = SlotId::new("root-section-0-accessory-button-0");

        assert_eq!(
            section.path_of(&text_id, "messageComponent").as_deref(),
            Some("messageComponent.children[0]")
        );
        assert_eq!(
            section.path_of(&accessory_id, "messageComponent").as_deref(),
            Some("messageComponent.accessory")
        );
        assert_eq!(
            section.ancestor_ids(&accessory_id),
            Some(vec![section.id.clone()])
        );
        assert_eq!(section.ancestor_ids(&"missing".into()), None);
    }

    #[test]
    fn test_serde_uses_type_tag() {
        let text = Component::new(
            "t",
            ComponentKind::Text {
                content: "hi".to_string(),
            },
        );
        let json = serde_json::to_value(&text).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "id": "t", "type": "Text", "content": "hi" })
        );
        assert_eq!(serde_json::from_value::<Component>(json).unwrap(), text);
    }
}
