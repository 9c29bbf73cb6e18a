//! # Courier Builder
//!
//! Editing session for a composed message.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: renders outline, panels, preview      │
//! └─────────────────────────────────────────────┘
//!          ↓ keys / edits / fetched data
//! ┌─────────────────────────────────────────────┐
//! │ builder: BuilderSession                     │
//! │  - outline focus/selection (courier-tree)   │
//! │  - mutations + validation (courier-message) │
//! │  - preview article + placeholder warnings   │
//! │  - dirty tracking, reset, gated save        │
//! └─────────────────────────────────────────────┘
//!          ↓ ConnectionDetails
//! ┌─────────────────────────────────────────────┐
//! │ storage (outside this crate)                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All calls run to completion synchronously; the session never awaits.
//! Hosts that deliver events concurrently must serialize calls into it.
//!
//! ## Usage
//!
//! ```rust
//! use courier_builder::{BuilderOptions, BuilderSession};
//! use courier_message::{ComponentKind, ComponentType, Document, RootType};
//!
//! let mut session = BuilderSession::new(Document::new(RootType::Legacy), BuilderOptions::default());
//! let root = session.document().root_id().clone();
//!
//! session.add_child(&root, ComponentType::Text, false).unwrap();
//! session
//!     .update_selected(ComponentKind::Text { content: "New post: {{title}}".to_string() })
//!     .unwrap();
//!
//! let details = session.save().unwrap();
//! assert_eq!(details.content.as_deref(), Some("New post: {{title}}"));
//! assert!(!session.is_dirty());
//! ```

mod errors;
mod options;
mod outline;
mod preview;
mod session;

pub use errors::{BuilderError, FetchError};
pub use options::BuilderOptions;
pub use outline::DocumentOutline;
pub use preview::{PlaceholderEntry, PreviewArticle, PreviewState};
pub use session::BuilderSession;
