//! Collection loading: enumerate sources, parse concurrently, order.

use cardstock_core::{Collection, Document, Result};
use cardstock_parser::frontmatter;
use futures::future::join_all;
use tracing::instrument;

use crate::repo::SourceRepo;

/// Derive a document identifier from a source name.
///
/// Takes the last path segment and strips a trailing markdown extension
/// case-insensitively. Identifiers are unique within a collection but not
/// globally.
pub fn derive_identifier(name: &str) -> String {
    let segment = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let lower = segment.to_ascii_lowercase();
    for ext in [".md", ".markdown"] {
        if lower.ends_with(ext) && segment.len() > ext.len() {
            return segment[..segment.len() - ext.len()].to_string();
        }
    }
    segment.to_string()
}

/// Load every document in a collection.
///
/// Per-source fetches are independent and side-effect-free, so they fan
/// out concurrently and join before ordering. A source whose fetch fails
/// is skipped with a warning; it never fails the batch. The final order
/// is descending by publish date (lexical comparison over the sortable
/// date format); the sort is stable, so equal dates keep the repository's
/// enumeration order.
#[instrument(skip(repo), name = "collection_load")]
pub async fn load(repo: &dyn SourceRepo, collection: Collection) -> Result<Vec<Document>> {
    let names = repo.enumerate(collection).await?;
    log::info!(
        "loading {} sources from collection '{}'",
        names.len(),
        collection
    );

    let fetches = names.iter().map(|name| async move {
        match repo.fetch(collection, name).await {
            Ok(raw) => Some(build_document(collection, name, &raw)),
            Err(e) => {
                log::warn!("skipping source '{}' in '{}': {}", name, collection, e);
                None
            }
        }
    });

    let mut documents: Vec<Document> = join_all(fetches).await.into_iter().flatten().collect();
    documents.sort_by(|a, b| b.published.cmp(&a.published));

    Ok(documents)
}

/// Parse one raw source and assemble it into a document.
fn build_document(collection: Collection, name: &str, raw: &str) -> Document {
    let parsed = frontmatter::parse(raw);
    Document::assemble(collection, derive_identifier(name), parsed.header, parsed.body)
}
