//! # Cardstock Render
//!
//! The structural markdown transform: walks the typed
//! [`cardstock_core::ContentBlock`] tree and decides, per paragraph and
//! list item, whether to emit ordinary prose or promote the node to a
//! link card. Everything else (headings, blockquotes, code, inline
//! formatting) passes through with theme-appropriate styling only.
//!
//! The promotion guards are strict; see [`transform::Transform`] for
//! the exact rules.
//!
//! ## Quick Start
//!
//! ```
//! use cardstock_render::{RenderedBlock, Theme, Transform};
//! use cardstock_core::{ContentBlock, InlineElement};
//!
//! let body = vec![ContentBlock::Paragraph {
//!     inline: vec![InlineElement::Link {
//!         text: "Rust".to_string(),
//!         url: "https://www.rust-lang.org".to_string(),
//!         title: None,
//!     }],
//! }];
//!
//! let tree = Transform::new(Theme::Light).render(&body);
//! assert!(matches!(tree[0], RenderedBlock::Card(_)));
//! ```

pub mod transform;

pub use transform::{
    LinkCard, RenderedBlock, RenderedItem, Theme, Transform, is_external_url,
};
