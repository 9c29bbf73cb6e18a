//! Warnings for placeholders that resolved to nothing
//!
//! The rendering backend resolves a document against one article and hands
//! back Discord message objects. Those are matched against the template tree
//! and every templated field that came back empty becomes a `warning`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{Component, ComponentKind, ComponentType, Document, Problem, RootType};

/// Message flag marking a components-v2 message
pub const COMPONENTS_V2_FLAG: u64 = 1 << 15;

const CONSEQUENCE: &str =
    "This may cause article delivery to fail, which can result in this feed getting disabled.";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").expect("placeholder pattern is valid"));

/// Whether `value` contains a `{{placeholder}}`
pub fn has_placeholder(value: &str) -> bool {
    PLACEHOLDER.is_match(value)
}

/// Missing, null, `""`, `false` and `0` all count as empty
fn is_empty_resolved(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Compare `doc` with the messages it resolved to
pub fn extract_resolution_warnings(doc: &Document, resolved_messages: &[Value]) -> Vec<Problem> {
    let Some(first) = resolved_messages.first() else {
        return Vec::new();
    };

    let mut walker = Walker {
        doc,
        warnings: Vec::new(),
    };

    match doc.root_type() {
        Some(RootType::V2) => {
            let flags = first.get("flags").and_then(Value::as_u64).unwrap_or(0);
            let components: &[Value] = if flags & COMPONENTS_V2_FLAG != 0 {
                array(first.get("components"))
            } else {
                &[]
            };

            walker.v2_components(doc.root.children(), components);
        }
        Some(RootType::Legacy) => {
            if let Some(embeds) = first.get("embeds").and_then(Value::as_array) {
                walker.legacy_embeds(embeds);
            }

            if let Some(rows) = first.get("components").and_then(Value::as_array) {
                walker.legacy_buttons(rows);
            }
        }
        None => {}
    }

    walker.warnings
}

fn array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn media_url(value: &Value) -> Option<&Value> {
    value.get("media").and_then(|media| media.get("url"))
}

struct Walker<'a> {
    doc: &'a Document,
    warnings: Vec<Problem>,
}

impl<'a> Walker<'a> {
    fn check(&mut self, component: &Component, template: &str, resolved: Option<&Value>, field: &str) {
        if !has_placeholder(template) || !is_empty_resolved(resolved) {
            return;
        }

        let label = component.component_type().label();
        let path = self
            .doc
            .path_of(&component.id)
            .unwrap_or_else(|| label.to_string());

        self.warnings.push(Problem::warning(
            format!(
                "{} \"{}\" has a placeholder that resolved to be empty for this article. {}",
                label, field, CONSEQUENCE
            ),
            path,
            component.id.clone(),
        ));
    }

    /// Template nodes the backend stripped (e.g. galleries with images
    /// stripped) are skipped without consuming a resolved component
    fn v2_components(&mut self, template: &[Component], resolved: &[Value]) {
        let mut cursor = 0;

        for child in template {
            let Some(current) = resolved.get(cursor) else {
                continue;
            };

            if let Some(expected) = child.component_type().discord_type() {
                if current.get("type").and_then(Value::as_u64) != Some(u64::from(expected)) {
                    continue;
                }
            }

            cursor += 1;

            match &child.kind {
                ComponentKind::TextDisplay { content } => {
                    self.check(child, content, current.get("content"), "Text Content");
                }
                ComponentKind::Button { label, .. } => {
                    self.check(child, label, current.get("label"), "Button Label");
                }
                ComponentKind::Thumbnail { media_url: url, .. } => {
                    self.check(child, url, media_url(current), "Image URL");
                }
                ComponentKind::Section { children, accessory } => {
                    if let Some(components) = current.get("components").and_then(Value::as_array) {
                        self.v2_components(children, components);
                    }

                    if let (Some(accessory), Some(resolved)) =
                        (accessory.as_deref(), current.get("accessory"))
                    {
                        self.accessory(accessory, resolved);
                    }
                }
                ComponentKind::ActionRow { children } | ComponentKind::Container { children, .. } => {
                    if let Some(components) = current.get("components").and_then(Value::as_array) {
                        self.v2_components(children, components);
                    }
                }
                ComponentKind::MediaGallery { children } => {
                    let items = array(current.get("items"));

                    for (item, resolved_item) in children.iter().zip(items) {
                        if let ComponentKind::MediaGalleryItem { media_url: url, .. } = &item.kind {
                            self.check(item, url, media_url(resolved_item), "Media URL");
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn accessory(&mut self, accessory: &Component, resolved: &Value) {
        match &accessory.kind {
            ComponentKind::Thumbnail { media_url: url, .. } => {
                self.check(accessory, url, media_url(resolved), "Image URL");
            }
            ComponentKind::Button { label, .. } => {
                self.check(accessory, label, resolved.get("label"), "Button Label");
            }
            _ => {}
        }
    }

    fn legacy_embeds(&mut self, resolved_embeds: &[Value]) {
        let doc = self.doc;
        let Some(container) = doc
            .root
            .children()
            .iter()
            .find(|child| child.component_type() == ComponentType::EmbedContainer)
        else {
            return;
        };

        let embeds = container
            .children()
            .iter()
            .filter(|embed| embed.component_type() == ComponentType::Embed);

        for (embed, resolved) in embeds.zip(resolved_embeds) {
            for part in embed.children() {
                match &part.kind {
                    ComponentKind::EmbedTitle { title, .. } => {
                        self.check(part, title, resolved.get("title"), "Text");
                    }
                    ComponentKind::EmbedDescription { description } => {
                        self.check(part, description, resolved.get("description"), "Description");
                    }
                    ComponentKind::EmbedThumbnail { thumbnail_url } => {
                        let url = resolved.get("thumbnail").and_then(|t| t.get("url"));
                        self.check(part, thumbnail_url, url, "Image URL");
                    }
                    ComponentKind::EmbedImage { image_url } => {
                        let url = resolved.get("image").and_then(|i| i.get("url"));
                        self.check(part, image_url, url, "Image URL");
                    }
                    ComponentKind::EmbedAuthor { author_name, .. } => {
                        let name = resolved.get("author").and_then(|a| a.get("name"));
                        self.check(part, author_name, name, "Name");
                    }
                    ComponentKind::EmbedFooter { footer_text, .. } => {
                        let text = resolved.get("footer").and_then(|f| f.get("text"));
                        self.check(part, footer_text, text, "Text");
                    }
                    _ => {}
                }
            }
        }
    }

    fn legacy_buttons(&mut self, resolved_rows: &[Value]) {
        let doc = self.doc;
        let rows = doc
            .root
            .children()
            .iter()
            .filter(|child| child.component_type() == ComponentType::LegacyActionRow);

        for (row, resolved_row) in rows.zip(resolved_rows) {
            let Some(buttons) = resolved_row.get("components").and_then(Value::as_array) else {
                continue;
            };

            for (button, resolved) in row.children().iter().zip(buttons) {
                if let ComponentKind::LegacyButton { label, .. } = &button.kind {
                    self.check(button, label, resolved.get("label"), "Button Label");
                }
            }
        }
    }
}
