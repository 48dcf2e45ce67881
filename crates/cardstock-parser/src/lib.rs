//! # Cardstock Parser
//!
//! Turns raw content sources into structured pieces:
//!
//! - [`frontmatter`] splits a raw text blob into a lightweight key-value
//!   header ([`cardstock_core::HeaderFields`]) and a markdown body. The
//!   header format is small: scalar strings plus one flat list field.
//!   Malformed headers degrade to "no header", never an error.
//! - [`blocks`] parses a markdown body into the typed
//!   [`cardstock_core::ContentBlock`] tree via `pulldown-cmark`, the shape
//!   consumed by the structural transform in `cardstock-render`.
//!
//! ## Quick Start
//!
//! ```
//! use cardstock_parser::{frontmatter, parse_blocks};
//!
//! let raw = "---\ntitle: Reading List\ntags: [links]\n---\n\n[Rust](https://www.rust-lang.org)";
//! let parsed = frontmatter::parse(raw);
//! assert_eq!(parsed.header.title.as_deref(), Some("Reading List"));
//!
//! let tree = parse_blocks(&parsed.body);
//! assert_eq!(tree.len(), 1);
//! ```

pub mod blocks;
pub mod frontmatter;

pub use blocks::parse_blocks;
pub use frontmatter::{Parsed, parse as parse_frontmatter};
