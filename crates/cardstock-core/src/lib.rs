//! # Cardstock Core
//!
//! Core data models, error types, and configuration for the cardstock
//! content pipeline. This crate defines the canonical types that all other
//! crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: a closed [`Collection`] enum and a typed
//!   markdown tree replace string probing
//! - **Zero Panic in Libraries**: fallible operations return [`Result`]
//! - **Degrade, Don't Throw**: data-shape problems (malformed headers,
//!   unmatched node shapes) are not errors and never surface as one
//! - **Immutable by Default**: a [`Document`] never changes after load
//!
//! ## Core Modules
//!
//! - [`models`] - Document, collection, header, and like-snapshot types
//! - [`ast`] - Typed markdown block/inline tree for the structural transform
//! - [`error`] - Error enum and Result alias
//! - [`config`] - Site configuration with builder and validation
//!
//! ## Usage
//!
//! ```
//! use cardstock_core::prelude::*;
//!
//! let doc = Document::assemble(
//!     Collection::Posts,
//!     "hello-world".to_string(),
//!     HeaderFields::default(),
//!     "Some body".to_string(),
//! );
//! assert_eq!(doc.title, "hello-world");
//! assert_eq!(doc.published, EPOCH_DATE);
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod models;

pub use ast::{ContentBlock, InlineElement, ListItem};
pub use config::{SiteConfig, SiteConfigBuilder};
pub use error::{Error, Result};
pub use models::{Collection, Document, EPOCH_DATE, HeaderFields, LikeSnapshot};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ast::{ContentBlock, InlineElement, ListItem};
    pub use crate::config::{SiteConfig, SiteConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Collection, Document, EPOCH_DATE, HeaderFields, LikeSnapshot};
}
