//! blockpage: block documents for link-in-bio pages and email templates.
//!
//! A page is an ordered list of typed blocks. This crate provides:
//!
//! - **Block model** - the closed set of block types, their attribute
//!   payloads, default bundles and named variations, and the flat JSON wire
//!   format used for persistence
//! - **Block editor** - add / update / delete / reorder / move with a bounded
//!   undo history, redo, re-keying and dirty tracking
//! - **Markup compiler** - renders a block list into a self-contained HTML
//!   email with table layout, inline styles and Outlook fallbacks
//!
//! # Quick Start
//!
//! ```rust
//! use blockpage::{BlockEditor, RenderTarget, compile};
//!
//! let mut editor = BlockEditor::new();
//! let button = editor.add_block("button", Some("Shop"), Some("button-neon"));
//! editor.update_block(button.id().as_str(), &serde_json::json!({ "href": "https://portyo.me" }));
//!
//! let html = compile(editor.blocks(), &RenderTarget::default()).unwrap();
//! assert!(html.contains("Shop"));
//! ```

// Block types, attributes, defaults and wire format
pub mod model;

// Stateful editor with bounded history
pub mod editor;

// Block list to HTML email
pub mod compile;

pub use model::{
    Block, BlockId, BlockKind, BlockType, DEFAULT_TITLE, UnknownBlockType, create_block,
    create_default_block, variations,
};

pub use editor::{BlockEditor, HISTORY_CAPACITY, History};

pub use compile::{CompileError, RenderTarget, compile, render_block};
