//! # Cardstock Collection
//!
//! Loads named collections of raw markdown sources into ordered
//! [`cardstock_core::Document`] lists.
//!
//! The loader is backend-agnostic: it consumes the [`SourceRepo`]
//! capability (enumerate names, fetch text) and does the rest itself:
//! frontmatter parsing, identifier derivation, field defaults, and a
//! stable descending-by-date ordering. [`DirRepo`] is the shipped
//! filesystem backend.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cardstock_collection::{DirRepo, load};
//! use cardstock_core::Collection;
//!
//! # async fn run() -> cardstock_core::Result<()> {
//! let repo = DirRepo::new("content");
//! let posts = load(&repo, Collection::Posts).await?;
//! for doc in &posts {
//!     println!("{} ({})", doc.title, doc.published);
//! }
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod repo;

pub use loader::{derive_identifier, load};
pub use repo::{DirRepo, SourceRepo};
