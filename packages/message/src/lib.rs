//! # Courier Message
//!
//! Document model, structural mutations and validation for composed
//! Discord messages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ persisted: stored connection payload        │
//! └─────────────────────────────────────────────┘
//!                     ↕ convert
//! ┌─────────────────────────────────────────────┐
//! │ Document: root Component + RootSettings     │
//! │  - slot ids derived from position           │
//! │  - closed ComponentKind set                 │
//! └─────────────────────────────────────────────┘
//!          ↓ mutations              ↓ validator
//! ┌──────────────────────┐  ┌──────────────────────┐
//! │ new Document +       │  │ Problem[] in         │
//! │ selection hint       │  │ document order       │
//! └──────────────────────┘  └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use courier_message::{add_child, validate_document, ComponentType, Document, RootType};
//!
//! let doc = Document::new(RootType::Legacy);
//! let root = doc.root_id().clone();
//!
//! let added = add_child(&doc, &root, ComponentType::Text, false).unwrap();
//! let problems = validate_document(&added.document);
//!
//! assert_eq!(problems.len(), 1);
//! assert_eq!(problems[0].component_id, added.created_id);
//! ```

pub mod component;
pub mod convert;
pub mod document;
pub mod mutations;
pub mod persisted;
pub mod problem;
pub mod resolution;
pub mod settings;
pub mod slot;
pub mod validator;

pub use component::{create_component, ButtonStyle, Component, ComponentKind, ComponentType, TimestampSource};
pub use convert::{details_from_document, document_from_details};
pub use document::{Document, RootType};
pub use mutations::{
    add_child, delete_component, move_down, move_up, switch_root_type, update_component, Added,
    Deleted, Moved, Mutation, MutationError, MutationOutcome,
};
pub use persisted::ConnectionDetails;
pub use problem::{Problem, Severity};
pub use resolution::{extract_resolution_warnings, has_placeholder, COMPONENTS_V2_FLAG};
pub use settings::{ForumThreadTag, MentionKind, MentionTarget, Mentions, PlaceholderLimit, RootSettings};
pub use slot::SlotId;
pub use validator::{validate, validate_at, validate_document, ROOT_PATH};
