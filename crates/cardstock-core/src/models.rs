//! Core data models for cardstock collections.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Immutable after load**: no component mutates a [`Document`] post-construction
//! - **Type-Safe**: a closed [`Collection`] enum replaces magic strings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel publish date for documents whose header omits `date`.
///
/// Lexically older than any real date, so undated documents sort last
/// under the descending-by-date collection ordering.
pub const EPOCH_DATE: &str = "1970-01-01";

/// A named bucket of documents sharing a schema and a loading source.
///
/// Membership is fixed at load time; the set of collections is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Long-form entries (the blog)
    Posts,
    /// Curated link/resource entries
    Resources,
}

impl Collection {
    /// Stable lowercase name, used for directory layout and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Posts => "posts",
            Collection::Resources => "resources",
        }
    }

    /// All known collections.
    pub fn all() -> [Collection; 2] {
        [Collection::Posts, Collection::Resources]
    }

    /// Look up a collection by its stable name.
    pub fn from_name(name: &str) -> Option<Collection> {
        match name {
            "posts" => Some(Collection::Posts),
            "resources" => Some(Collection::Resources),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed header block fields.
///
/// Transient intermediate produced by the frontmatter parser; recognized
/// keys only, everything else is dropped during parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderFields {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl HeaderFields {
    /// True when no recognized key was present in the header block.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.tags.is_empty()
    }

    /// Serialize the fields back into a fenced header block followed by `body`.
    ///
    /// Tag elements are always double-quoted so values containing commas or
    /// spaces survive a reparse.
    pub fn to_block(&self, body: &str) -> String {
        let mut out = String::from("---\n");
        if let Some(title) = &self.title {
            out.push_str(&format!("title: {}\n", title));
        }
        if let Some(date) = &self.date {
            out.push_str(&format!("date: {}\n", date));
        }
        if let Some(description) = &self.description {
            out.push_str(&format!("description: {}\n", description));
        }
        if !self.tags.is_empty() {
            let quoted: Vec<String> = self.tags.iter().map(|t| format!("\"{}\"", t)).collect();
            out.push_str(&format!("tags: [{}]\n", quoted.join(", ")));
        }
        out.push_str("---\n\n");
        out.push_str(body);
        out
    }
}

/// A loaded content document.
///
/// Invariants: `title` is never empty, `body` is never null (empty string is
/// valid), `tags` is always present (possibly empty), and `collection` is
/// fixed at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source-derived identifier, unique within its collection.
    pub id: String,
    pub collection: Collection,
    pub title: String,
    /// `YYYY-MM-DD`-like sortable textual date; [`EPOCH_DATE`] when absent.
    pub published: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Markdown body with the header block removed.
    pub body: String,
}

impl Document {
    /// Assemble a document from parsed parts, applying field defaults.
    pub fn assemble(collection: Collection, id: String, header: HeaderFields, body: String) -> Self {
        let title = header
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| id.clone());
        let published = header
            .date
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| EPOCH_DATE.to_string());

        Self {
            id,
            collection,
            title,
            published,
            description: header.description,
            tags: header.tags,
            body,
        }
    }

    /// Whether the document carries a real publish date.
    pub fn is_dated(&self) -> bool {
        self.published != EPOCH_DATE
    }
}

/// Point-in-time view of a document's like count and the current actor's
/// liked state.
///
/// The count is owned by the remote store; the boolean is owned by the
/// local cache unless a successful remote call explicitly reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeSnapshot {
    pub id: String,
    pub likes: u64,
    pub liked_by_me: bool,
}

impl LikeSnapshot {
    /// Create a snapshot.
    pub fn new(id: impl Into<String>, likes: u64, liked_by_me: bool) -> Self {
        Self {
            id: id.into(),
            likes,
            liked_by_me,
        }
    }
}
