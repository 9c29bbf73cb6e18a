//! # Courier Tree
//!
//! Keyboard-navigable tree state, independent of whatever draws the tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ TreeView: roots / children / parent         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ traversal: first / next / previous / last   │
//! │  visible node over an expansion set         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ TreeInteractionState: focus, selection,     │
//! │  expansion + keyboard reducer               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! A node is *visible* when every one of its ancestors is expanded. All
//! traversal functions are total: they return `None` at the edges of the
//! tree, which callers treat as "stay put".
//!
//! ## Usage
//!
//! ```rust
//! use courier_tree::{Key, StaticTree, TreeInteractionState};
//!
//! let tree = StaticTree::new()
//!     .with_root("root")
//!     .with_child("root", "a")
//!     .with_child("root", "b");
//!
//! let state = TreeInteractionState::new()
//!     .with_expanded(["root"])
//!     .with_focus("root");
//!
//! let (state, response) = state.handle_key(&tree, Key::ArrowDown);
//! assert!(response.is_consumed());
//! assert_eq!(state.focused_id(), Some(&"a"));
//! ```

mod keyboard;
mod state;
mod static_tree;
mod traversal;

pub use keyboard::{Key, KeyResponse};
pub use state::{NodeView, TreeInteractionState};
pub use static_tree::StaticTree;
pub use traversal::{
    first_visible, first_visible_child, last_visible, last_visible_descendant, next_visible,
    previous_visible, TreeView,
};
