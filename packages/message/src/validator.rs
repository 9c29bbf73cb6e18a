//! # Validator
//!
//! Recursive, variant-dispatched validation of a component tree.
//!
//! ```text
//! component ──► own fields ──► children count ──► each child:
//!                                                  legal here? then recurse
//!           ──► accessory: present & allowed? then recurse into it
//! ```
//!
//! Problems come out in document order. Field problems carry the path of the
//! field and the id of the component owning it; count problems point at the
//! owner's `children` (or `accessory`) path.

use crate::{ButtonStyle, Component, ComponentKind, ComponentType, Document, Problem, SlotId};

/// Form path of the document root
pub const ROOT_PATH: &str = "messageComponent";

pub fn validate_document(doc: &Document) -> Vec<Problem> {
    validate(&doc.root)
}

/// Validate `component` as if it were the document root
pub fn validate(component: &Component) -> Vec<Problem> {
    validate_at(component, ROOT_PATH)
}

/// Validate `component` with paths rooted at `path`
pub fn validate_at(component: &Component, path: &str) -> Vec<Problem> {
    let mut validator = Validator::default();
    validator.component(component, path);
    validator.problems
}

/// Per-field string rule
#[derive(Debug, Clone, Copy)]
struct Rule {
    name: &'static str,
    required: bool,
    max: Option<usize>,
}

const fn required(name: &'static str, max: Option<usize>) -> Rule {
    Rule {
        name,
        required: true,
        max,
    }
}

const fn optional(name: &'static str, max: usize) -> Rule {
    Rule {
        name,
        required: false,
        max: Some(max),
    }
}

#[derive(Default)]
struct Validator {
    problems: Vec<Problem>,
}

impl Validator {
    fn component(&mut self, component: &Component, path: &str) {
        let id = &component.id;

        match &component.kind {
            ComponentKind::LegacyRoot { .. } => {}
            ComponentKind::V2Root { children } => {
                self.count(id, path, children.len(), 1, None, |_| {
                    "Add at least one component to your message".to_string()
                });
            }
            ComponentKind::Text { content } => {
                self.text(id, path, "content", Some(content), required("Text content", Some(2000)));
            }
            ComponentKind::EmbedContainer { children } => {
                if children.len() > 9 {
                    self.error(id, children_path(path), "Expected at most 9 embeds");
                }
            }
            ComponentKind::Embed { children, .. } => {
                let fields = children
                    .iter()
                    .filter(|child| child.component_type() == ComponentType::EmbedField)
                    .count();

                if fields > 25 {
                    self.error(id, children_path(path), "Expected at most 25 embed fields");
                }
            }
            ComponentKind::EmbedAuthor { author_name, .. } => {
                self.text(id, path, "authorName", Some(author_name), required("Author Name", Some(256)));
            }
            ComponentKind::EmbedTitle { title, .. } => {
                self.text(id, path, "title", Some(title), required("Embed Title", Some(256)));
            }
            ComponentKind::EmbedDescription { description } => {
                self.text(
                    id,
                    path,
                    "description",
                    Some(description),
                    required("Embed Description", Some(4096)),
                );
            }
            ComponentKind::EmbedImage { image_url } => {
                self.text(id, path, "imageUrl", Some(image_url), required("image URL", None));
            }
            ComponentKind::EmbedThumbnail { thumbnail_url } => {
                self.text(
                    id,
                    path,
                    "thumbnailUrl",
                    Some(thumbnail_url),
                    required("thumbnail URL", None),
                );
            }
            ComponentKind::EmbedFooter { footer_text, .. } => {
                self.text(id, path, "footerText", Some(footer_text), required("Footer Text", Some(2048)));
            }
            ComponentKind::EmbedField {
                field_name,
                field_value,
                ..
            } => {
                self.text(id, path, "fieldName", Some(field_name), required("Field Name", Some(256)));
                self.text(
                    id,
                    path,
                    "fieldValue",
                    Some(field_value),
                    required("Field Value", Some(1024)),
                );
            }
            ComponentKind::EmbedTimestamp { .. } => {}
            ComponentKind::LegacyActionRow { children } | ComponentKind::ActionRow { children } => {
                self.count(id, path, children.len(), 1, Some(5), |bound| match bound {
                    Bound::Min(_) => {
                        "Expected Action Row to have at least one child component".to_string()
                    }
                    Bound::Max(max) => {
                        format!("Expected Action Row to have at most {} child components", max)
                    }
                });
            }
            ComponentKind::LegacyButton {
                label, style, url, ..
            } => {
                self.text(id, path, "label", Some(label), required("Button label", Some(80)));

                if *style != ButtonStyle::Link {
                    self.error(id, field_path(path, "style"), "Expected Link style for this button");
                }

                self.text(id, path, "url", Some(url), required("URL for button", None));
            }
            ComponentKind::Button {
                label, style, href, ..
            } => {
                self.text(id, path, "label", Some(label), required("Button label", Some(80)));

                if *style == ButtonStyle::Link {
                    self.text(id, path, "href", href.as_deref(), required("Link URL", Some(512)));
                }
            }
            ComponentKind::TextDisplay { content } => {
                self.text(
                    id,
                    path,
                    "content",
                    Some(content),
                    required("Text Display content", Some(2000)),
                );
            }
            ComponentKind::Section { children, .. } => {
                self.count(id, path, children.len(), 1, Some(3), |bound| match bound {
                    Bound::Min(_) => "Expected Section to have at least 1 child component".to_string(),
                    Bound::Max(max) => {
                        format!("Expected Section to have at most {} child components", max)
                    }
                });
            }
            ComponentKind::Thumbnail {
                media_url,
                description,
                ..
            } => {
                self.text(id, path, "mediaUrl", Some(media_url), required("Image URL", Some(2048)));
                self.text(id, path, "description", description.as_deref(), optional("description", 1024));
            }
            ComponentKind::Divider { .. } => {}
            ComponentKind::Container { children, .. } => {
                self.count(id, path, children.len(), 1, None, |_| {
                    "Expected Container to have at least 1 child component".to_string()
                });
            }
            ComponentKind::MediaGallery { children } => {
                self.count(id, path, children.len(), 1, Some(10), |bound| match bound {
                    Bound::Min(_) => "Expected Media Gallery to have at least 1 item".to_string(),
                    Bound::Max(max) => format!("Expected Media Gallery to have at most {} items", max),
                });
            }
            ComponentKind::MediaGalleryItem {
                media_url,
                description,
                ..
            } => {
                self.text(id, path, "mediaUrl", Some(media_url), required("media URL", Some(2048)));
                self.text(id, path, "description", description.as_deref(), optional("description", 256));
            }
        }

        let owner = component.component_type();

        for (index, child) in component.children().iter().enumerate() {
            let child_path = format!("{}.children[{}]", path, index);

            if !owner.accepts_child(child.component_type()) {
                self.error(
                    &child.id,
                    child_path.clone(),
                    format!(
                        "{} cannot be placed inside {}",
                        child.component_type().label(),
                        owner.label()
                    ),
                );
            }

            self.component(child, &child_path);
        }

        if owner == ComponentType::Section {
            self.accessory(component, path);
        }
    }

    /// Presence and type first, then the accessory's own fields
    fn accessory(&mut self, section: &Component, path: &str) {
        let accessory_path = field_path(path, "accessory");

        match section.accessory() {
            None => self.error(
                &section.id,
                accessory_path,
                "Expected Section to have an accessory component (Button or Thumbnail)",
            ),
            Some(accessory)
                if !ComponentType::Section.accepts_accessory(accessory.component_type()) =>
            {
                self.error(
                    &section.id,
                    accessory_path,
                    "Expected Section to have an accessory component (Button or Thumbnail)",
                )
            }
            Some(accessory) => self.component(accessory, &accessory_path),
        }
    }

    fn text(&mut self, id: &SlotId, path: &str, field: &str, value: Option<&str>, rule: Rule) {
        let value = value.unwrap_or_default();

        if value.trim().is_empty() {
            if rule.required {
                self.error(id, field_path(path, field), format!("Expected non-empty {}", rule.name));
            }
            return;
        }

        if let Some(max) = rule.max {
            if value.chars().count() > max {
                self.error(
                    id,
                    field_path(path, field),
                    format!("Expected {} to have at most {} characters", rule.name, max),
                );
            }
        }
    }

    /// Reports at most one problem: below `min` or above `max`
    fn count(
        &mut self,
        id: &SlotId,
        path: &str,
        len: usize,
        min: usize,
        max: Option<usize>,
        message: impl Fn(Bound) -> String,
    ) {
        let bound = if len < min {
            Bound::Min(min)
        } else if let Some(max) = max.filter(|max| len > *max) {
            Bound::Max(max)
        } else {
            return;
        };

        self.error(id, children_path(path), message(bound));
    }

    fn error(&mut self, id: &SlotId, path: impl Into<String>, message: impl Into<String>) {
        self.problems.push(Problem::error(message, path, id.clone()));
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Min(usize),
    Max(usize),
}

fn field_path(path: &str, field: &str) -> String {
    format!("{}.{}", path, field)
}

fn children_path(path: &str) -> String {
    field_path(path, "children")
}
