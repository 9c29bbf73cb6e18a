//! # Payload Conversion
//!
//! Total, pure mapping between [`ConnectionDetails`] and [`Document`].
//!
//! ```text
//! ConnectionDetails ──document_from_details──► Document
//!        ▲                                        │
//!        └────────────details_from_document───────┘
//! ```
//!
//! A payload with a non-empty `componentsV2` list becomes a V2 document;
//! anything else becomes a legacy one. Converting a document back writes only
//! the fields of its root type and clears the other flavour's fields.
//! Components with no stored counterpart (e.g. legacy parts under a V2 root)
//! are dropped on the way out; validation is a separate concern.

use crate::persisted::{
    ComponentRow, ConnectionDetails, EmbedAuthorPayload, EmbedFieldPayload, EmbedFooterPayload,
    EmbedPayload, Formatter, MediaGalleryItemPayload, RowButton, UrlPayload, V2Payload,
};
use crate::{
    create_component, ButtonStyle, Component, ComponentKind, ComponentType, Document,
    RootSettings, RootType, SlotId,
};

/// Build an editable document from a stored payload
pub fn document_from_details(details: &ConnectionDetails) -> Document {
    let settings = settings_from_details(details);

    if details.is_v2() {
        let mut document = Document::new(RootType::V2).with_settings(settings);
        let root_id = document.root_id().clone();
        let children = details
            .components_v2
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, payload)| component_from_v2(payload, &root_id, index))
            .collect();

        document.root.kind = ComponentKind::V2Root { children };
        return document;
    }

    let mut document = Document::new(RootType::Legacy).with_settings(settings);
    let root_id = document.root_id().clone();
    let mut children = Vec::new();

    if let Some(content) = details.content.as_deref().filter(|c| !c.is_empty()) {
        let mut text = create_component(ComponentType::Text, Some(&root_id), children.len());
        text.kind = ComponentKind::Text {
            content: content.to_string(),
        };
        children.push(text);
    }

    if !details.embeds.is_empty() {
        let mut container =
            create_component(ComponentType::EmbedContainer, Some(&root_id), children.len());
        let embeds = details
            .embeds
            .iter()
            .enumerate()
            .map(|(index, embed)| embed_from_payload(embed, &container.id, index))
            .collect();
        container.kind = ComponentKind::EmbedContainer { children: embeds };
        children.push(container);
    }

    for row in details.component_rows.iter().flatten() {
        if row.components.is_empty() {
            continue;
        }

        let mut action_row =
            create_component(ComponentType::LegacyActionRow, Some(&root_id), children.len());
        let buttons = row
            .components
            .iter()
            .filter(|button| button.kind == 2)
            .enumerate()
            .map(|(index, button)| Component {
                id: SlotId::derive(Some(&action_row.id), ComponentType::LegacyButton, index),
                kind: ComponentKind::LegacyButton {
                    label: button.label.clone(),
                    style: ButtonStyle::from_number(button.style),
                    disabled: button.disabled,
                    url: button.url.clone().unwrap_or_default(),
                },
            })
            .collect();
        action_row.kind = ComponentKind::LegacyActionRow { children: buttons };
        children.push(action_row);
    }

    document.root.kind = ComponentKind::LegacyRoot { children };
    document
}

/// Flatten a document into the stored payload
pub fn details_from_document(doc: &Document) -> ConnectionDetails {
    let mut details = details_with_settings(&doc.settings);

    match doc.root_type() {
        Some(RootType::V2) => {
            let components: Vec<_> = doc.root.children().iter().filter_map(v2_from_component).collect();

            details.content = Some(String::new());
            details.embeds = Vec::new();
            details.component_rows = None;
            details.components_v2 = (!components.is_empty()).then_some(components);
        }
        _ => {
            let children = doc.root.children();

            details.content = Some(
                children
                    .iter()
                    .find_map(|child| match &child.kind {
                        ComponentKind::Text { content } => Some(content.clone()),
                        _ => None,
                    })
                    .unwrap_or_default(),
            );

            details.embeds = children
                .iter()
                .find(|child| child.component_type() == ComponentType::EmbedContainer)
                .map(|container| container.children().iter().map(embed_to_payload).collect())
                .unwrap_or_default();

            let rows: Vec<_> = children
                .iter()
                .filter(|child| child.component_type() == ComponentType::LegacyActionRow)
                .map(row_to_payload)
                .collect();

            details.component_rows = (!rows.is_empty()).then_some(rows);
            details.components_v2 = None;
        }
    }

    details
}

fn settings_from_details(details: &ConnectionDetails) -> RootSettings {
    let formatter = details.formatter.clone().unwrap_or_default();

    RootSettings {
        mentions: details.mentions.clone(),
        placeholder_limits: details.placeholder_limits.clone(),
        forum_thread_title: details.forum_thread_title.clone(),
        forum_thread_tags: details.forum_thread_tags.clone(),
        is_forum_channel: details
            .channel
            .as_ref()
            .map(|channel| channel.kind == "forum"),
        channel_new_thread_title: details.channel_new_thread_title.clone(),
        channel_new_thread_excludes_preview: details.channel_new_thread_excludes_preview,
        format_tables: formatter.format_tables,
        strip_images: formatter.strip_images,
        ignore_new_lines: formatter.ignore_new_lines,
        enable_placeholder_fallback: details.enable_placeholder_fallback,
    }
}

fn details_with_settings(settings: &RootSettings) -> ConnectionDetails {
    let formatter = Formatter {
        format_tables: settings.format_tables,
        strip_images: settings.strip_images,
        ignore_new_lines: settings.ignore_new_lines,
    };

    ConnectionDetails {
        formatter: (formatter != Formatter::default()).then_some(formatter),
        enable_placeholder_fallback: settings.enable_placeholder_fallback,
        forum_thread_title: settings.forum_thread_title.clone(),
        forum_thread_tags: settings.forum_thread_tags.clone(),
        mentions: settings.mentions.clone(),
        placeholder_limits: settings.placeholder_limits.clone(),
        channel_new_thread_title: settings.channel_new_thread_title.clone(),
        channel_new_thread_excludes_preview: settings.channel_new_thread_excludes_preview,
        ..Default::default()
    }
}

fn embed_from_payload(embed: &EmbedPayload, parent: &SlotId, index: usize) -> Component {
    let mut component = create_component(ComponentType::Embed, Some(parent), index);
    let id = component.id.clone();
    let mut parts = Vec::new();

    let mut push = |component_type: ComponentType, kind: ComponentKind| {
        let part_index = parts.len();
        parts.push(Component {
            id: SlotId::derive(Some(&id), component_type, part_index),
            kind,
        });
    };

    if let Some(author) = embed.author.as_ref().filter(|a| !a.name.is_empty()) {
        push(
            ComponentType::EmbedAuthor,
            ComponentKind::EmbedAuthor {
                author_name: author.name.clone(),
                author_url: author.url.clone(),
                author_icon_url: author.icon_url.clone(),
            },
        );
    }

    if let Some(title) = embed.title.as_ref().filter(|t| !t.is_empty()) {
        push(
            ComponentType::EmbedTitle,
            ComponentKind::EmbedTitle {
                title: title.clone(),
                title_url: embed.url.clone(),
            },
        );
    }

    if let Some(description) = embed.description.as_ref().filter(|d| !d.is_empty()) {
        push(
            ComponentType::EmbedDescription,
            ComponentKind::EmbedDescription {
                description: description.clone(),
            },
        );
    }

    for field in &embed.fields {
        push(
            ComponentType::EmbedField,
            ComponentKind::EmbedField {
                field_name: field.name.clone(),
                field_value: field.value.clone(),
                inline: field.inline,
            },
        );
    }

    if let Some(image) = embed.image.as_ref().filter(|i| !i.url.is_empty()) {
        push(
            ComponentType::EmbedImage,
            ComponentKind::EmbedImage {
                image_url: image.url.clone(),
            },
        );
    }

    if let Some(thumbnail) = embed.thumbnail.as_ref().filter(|t| !t.url.is_empty()) {
        push(
            ComponentType::EmbedThumbnail,
            ComponentKind::EmbedThumbnail {
                thumbnail_url: thumbnail.url.clone(),
            },
        );
    }

    if let Some(footer) = embed.footer.as_ref().filter(|f| !f.text.is_empty()) {
        push(
            ComponentType::EmbedFooter,
            ComponentKind::EmbedFooter {
                footer_text: footer.text.clone(),
                footer_icon_url: footer.icon_url.clone(),
            },
        );
    }

    if let Some(timestamp) = embed.timestamp {
        push(
            ComponentType::EmbedTimestamp,
            ComponentKind::EmbedTimestamp {
                timestamp: Some(timestamp),
            },
        );
    }

    component.kind = ComponentKind::Embed {
        color: embed
            .color
            .as_deref()
            .and_then(|hex| u32::from_str_radix(hex.trim_start_matches('#'), 16).ok()),
        children: parts,
    };
    component
}

fn embed_to_payload(embed: &Component) -> EmbedPayload {
    let mut payload = EmbedPayload::default();

    if let ComponentKind::Embed {
        color: Some(color), ..
    } = &embed.kind
    {
        payload.color = Some(format!("{:06x}", color));
    }

    // First part of each kind wins; fields keep their order
    for part in embed.children() {
        match &part.kind {
            ComponentKind::EmbedAuthor {
                author_name,
                author_url,
                author_icon_url,
            } if payload.author.is_none() => {
                payload.author = Some(EmbedAuthorPayload {
                    name: author_name.clone(),
                    url: author_url.clone(),
                    icon_url: author_icon_url.clone(),
                });
            }
            ComponentKind::EmbedTitle { title, title_url } if payload.title.is_none() => {
                payload.title = Some(title.clone());
                payload.url = title_url.clone();
            }
            ComponentKind::EmbedDescription { description } if payload.description.is_none() => {
                payload.description = Some(description.clone());
            }
            ComponentKind::EmbedField {
                field_name,
                field_value,
                inline,
            } => payload.fields.push(EmbedFieldPayload {
                name: field_name.clone(),
                value: field_value.clone(),
                inline: *inline,
            }),
            ComponentKind::EmbedImage { image_url } if payload.image.is_none() => {
                payload.image = Some(UrlPayload {
                    url: image_url.clone(),
                });
            }
            ComponentKind::EmbedThumbnail { thumbnail_url } if payload.thumbnail.is_none() => {
                payload.thumbnail = Some(UrlPayload {
                    url: thumbnail_url.clone(),
                });
            }
            ComponentKind::EmbedFooter {
                footer_text,
                footer_icon_url,
            } if payload.footer.is_none() => {
                payload.footer = Some(EmbedFooterPayload {
                    text: footer_text.clone(),
                    icon_url: footer_icon_url.clone(),
                });
            }
            ComponentKind::EmbedTimestamp { timestamp } if payload.timestamp.is_none() => {
                payload.timestamp = *timestamp;
            }
            _ => {}
        }
    }

    payload
}

fn row_to_payload(row: &Component) -> ComponentRow {
    let components = row
        .children()
        .iter()
        .filter_map(|button| match &button.kind {
            ComponentKind::LegacyButton {
                label,
                style,
                disabled,
                url,
            } => Some(RowButton {
                id: Some(button.id.to_string()),
                kind: 2,
                label: label.clone(),
                style: style.number(),
                url: Some(url.clone()),
                disabled: *disabled,
            }),
            _ => None,
        })
        .collect();

    ComponentRow {
        id: Some(row.id.to_string()),
        components,
    }
}

fn component_from_v2(payload: &V2Payload, parent: &SlotId, index: usize) -> Component {
    let component_type = match payload {
        V2Payload::TextDisplay { .. } => ComponentType::TextDisplay,
        V2Payload::Button { .. } => ComponentType::Button,
        V2Payload::Thumbnail { .. } => ComponentType::Thumbnail,
        V2Payload::Section { .. } => ComponentType::Section,
        V2Payload::ActionRow { .. } => ComponentType::ActionRow,
        V2Payload::Separator { .. } => ComponentType::Divider,
        V2Payload::Container { .. } => ComponentType::Container,
        V2Payload::MediaGallery { .. } => ComponentType::MediaGallery,
    };
    let id = SlotId::derive(Some(parent), component_type, index);
    let nested = |components: &[V2Payload]| -> Vec<Component> {
        components
            .iter()
            .enumerate()
            .map(|(index, child)| component_from_v2(child, &id, index))
            .collect()
    };

    let kind = match payload {
        V2Payload::TextDisplay { content } => ComponentKind::TextDisplay {
            content: content.clone(),
        },
        V2Payload::Button {
            style,
            label,
            url,
            disabled,
        } => ComponentKind::Button {
            label: label.clone().unwrap_or_default(),
            style: ButtonStyle::from_number(*style),
            disabled: *disabled,
            href: url.clone().filter(|url| !url.is_empty()),
        },
        V2Payload::Thumbnail {
            media,
            description,
            spoiler,
        } => ComponentKind::Thumbnail {
            media_url: media.url.clone(),
            description: description.clone(),
            spoiler: *spoiler,
        },
        V2Payload::Section {
            components,
            accessory,
        } => ComponentKind::Section {
            children: nested(components),
            accessory: accessory
                .as_deref()
                .map(|accessory| Box::new(component_from_v2(accessory, &id.accessory_scope(), 0))),
        },
        V2Payload::ActionRow { components } => ComponentKind::ActionRow {
            children: nested(components),
        },
        V2Payload::Separator { divider, spacing } => ComponentKind::Divider {
            visual: *divider,
            spacing: *spacing,
        },
        V2Payload::Container {
            components,
            accent_color,
            spoiler,
        } => ComponentKind::Container {
            children: nested(components),
            accent_color: *accent_color,
            spoiler: *spoiler,
        },
        V2Payload::MediaGallery { items } => ComponentKind::MediaGallery {
            children: items
                .iter()
                .enumerate()
                .map(|(index, item)| Component {
                    id: SlotId::derive(Some(&id), ComponentType::MediaGalleryItem, index),
                    kind: ComponentKind::MediaGalleryItem {
                        media_url: item.media.url.clone(),
                        description: item.description.clone(),
                        spoiler: item.spoiler,
                    },
                })
                .collect(),
        },
    };

    Component { id, kind }
}

fn v2_from_component(component: &Component) -> Option<V2Payload> {
    let nested =
        |children: &[Component]| children.iter().filter_map(v2_from_component).collect::<Vec<_>>();

    let payload = match &component.kind {
        ComponentKind::TextDisplay { content } => V2Payload::TextDisplay {
            content: content.clone(),
        },
        ComponentKind::Button {
            label,
            style,
            disabled,
            href,
        } => V2Payload::Button {
            style: style.number(),
            label: Some(label.clone()).filter(|label| !label.is_empty()),
            url: href.clone().filter(|href| !href.is_empty()),
            disabled: *disabled,
        },
        ComponentKind::Thumbnail {
            media_url,
            description,
            spoiler,
        } => V2Payload::Thumbnail {
            media: UrlPayload {
                url: media_url.clone(),
            },
            description: description.clone(),
            spoiler: *spoiler,
        },
        ComponentKind::Section {
            children,
            accessory,
        } => V2Payload::Section {
            components: nested(children),
            accessory: accessory
                .as_deref()
                .and_then(v2_from_component)
                .map(Box::new),
        },
        ComponentKind::ActionRow { children } => V2Payload::ActionRow {
            components: nested(children),
        },
        ComponentKind::Divider { visual, spacing } => V2Payload::Separator {
            divider: *visual,
            spacing: *spacing,
        },
        ComponentKind::Container {
            children,
            accent_color,
            spoiler,
        } => V2Payload::Container {
            components: nested(children),
            accent_color: *accent_color,
            spoiler: *spoiler,
        },
        ComponentKind::MediaGallery { children } => V2Payload::MediaGallery {
            items: children
                .iter()
                .filter_map(|item| match &item.kind {
                    ComponentKind::MediaGalleryItem {
                        media_url,
                        description,
                        spoiler,
                    } => Some(MediaGalleryItemPayload {
                        media: UrlPayload {
                            url: media_url.clone(),
                        },
                        description: description.clone(),
                        spoiler: *spoiler,
                    }),
                    _ => None,
                })
                .collect(),
        },
        _ => return None,
    };

    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_payload_becomes_ordered_tree() {
        let details: ConnectionDetails = serde_json::from_value(json!({
            "content": "New article: {{title}}",
            "embeds": [{ "title": "{{title}}", "color": "ff0000", "fields": [
                { "name": "a", "value": "b" }
            ]}],
            "componentRows": [{ "components": [
                { "type": 2, "label": "Open", "style": 5, "url": "{{link}}" }
            ]}],
            "channel": { "type": "forum" }
        }))
        .unwrap();

        let doc = document_from_details(&details);
        let types: Vec<_> = doc
            .root
            .children()
            .iter()
            .map(Component::component_type)
            .collect();

        assert_eq!(
            types,
            vec![
                ComponentType::Text,
                ComponentType::EmbedContainer,
                ComponentType::LegacyActionRow
            ]
        );
        assert_eq!(doc.settings.is_forum_channel, Some(true));

        let embed = &doc.root.children()[1].children()[0];
        assert!(matches!(embed.kind, ComponentKind::Embed { color: Some(0xff0000), .. }));
        assert_eq!(embed.children().len(), 2);
    }

    #[test]
    fn test_v2_payload_with_accessory() {
        let details: ConnectionDetails = serde_json::from_value(json!({
            "componentsV2": [{
                "type": "SECTION",
                "components": [{ "type": "TEXT_DISPLAY", "content": "hi" }],
                "accessory": { "type": "BUTTON", "style": 5, "label": "Go", "url": "https://x" }
            }, { "type": "SEPARATOR" }]
        }))
        .unwrap();

        let doc = document_from_details(&details);
        assert_eq!(doc.root_type(), Some(RootType::V2));

        let section = &doc.root.children()[0];
        let accessory = section.accessory().unwrap();
        assert_eq!(accessory.id.as_str(), "v2-root-section-0-accessory-button-0");
        assert!(matches!(
            &accessory.kind,
            ComponentKind::Button { style: ButtonStyle::Link, href: Some(_), .. }
        ));
        assert!(matches!(
            doc.root.children()[1].kind,
            ComponentKind::Divider { visual: true, spacing: 1 }
        ));
    }

    #[test]
    fn test_round_trip_keeps_payload() {
        let details: ConnectionDetails = serde_json::from_value(json!({
            "content": "hello",
            "embeds": [{
                "color": "00ff00",
                "author": { "name": "Feed" },
                "title": "{{title}}",
                "url": "{{link}}",
                "fields": [{ "name": "n", "value": "v", "inline": true }],
                "footer": { "text": "footer" },
                "timestamp": "article"
            }],
            "componentRows": null,
            "componentsV2": null,
            "formatter": { "formatTables": true },
            "forumThreadTitle": "{{title}}"
        }))
        .unwrap();

        let round_tripped = details_from_document(&document_from_details(&details));
        assert_eq!(round_tripped, details);
    }

    #[test]
    fn test_disabled_row_button_survives_round_trip() {
        let details: ConnectionDetails = serde_json::from_value(json!({
            "content": "hi",
            "componentRows": [{ "id": "row", "components": [
                { "id": "a", "type": 2, "label": "Open", "style": 5, "url": "{{link}}", "disabled": true },
                { "id": "b", "type": 2, "label": "More", "style": 5, "url": "{{link}}" }
            ]}]
        }))
        .unwrap();

        let doc = document_from_details(&details);
        let row = &doc.root.children()[1];
        assert!(matches!(
            row.children()[0].kind,
            ComponentKind::LegacyButton { disabled: true, .. }
        ));

        let output = details_from_document(&doc);
        let buttons: Vec<bool> = output.component_rows.unwrap()[0]
            .components
            .iter()
            .map(|button| button.disabled)
            .collect();
        assert_eq!(buttons, vec![true, false]);
    }

    #[test]
    fn test_v2_output_clears_legacy_fields() {
        let details: ConnectionDetails = serde_json::from_value(json!({
            "componentsV2": [{ "type": "TEXT_DISPLAY", "content": "hi" }]
        }))
        .unwrap();

        let output = details_from_document(&document_from_details(&details));
        assert_eq!(output.content.as_deref(), Some(""));
        assert!(output.embeds.is_empty());
        assert_eq!(output.component_rows, None);
        assert_eq!(output.components_v2, details.components_v2);
    }

    #[test]
    fn test_legacy_parts_under_v2_root_are_dropped() {
        let mut doc = Document::new(RootType::V2);
        if let Some(children) = doc.root.children_mut() {
            children.push(create_component(ComponentType::Text, Some(&"v2-root".into()), 0));
        }

        assert_eq!(details_from_document(&doc).components_v2, None);
    }
}
