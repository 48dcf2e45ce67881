//! Source repositories: where raw collection text comes from.
//!
//! The loader works against the [`SourceRepo`] capability so tests and
//! alternative backends (bundled assets, remote storage) can stand in for
//! the filesystem. [`DirRepo`] is the shipped backend: one subdirectory
//! per collection under a content root.

use async_trait::async_trait;
use cardstock_core::{Collection, Error, Result};
use std::io;
use std::path::PathBuf;

/// File extensions recognized as markdown sources (matched case-insensitively).
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A registry of raw text sources, grouped by collection.
#[async_trait]
pub trait SourceRepo: Send + Sync {
    /// List the source names registered for a collection.
    ///
    /// The order must be deterministic across calls: it is the tie-break
    /// order for documents with equal publish dates.
    async fn enumerate(&self, collection: Collection) -> Result<Vec<String>>;

    /// Fetch one source's raw text by name.
    async fn fetch(&self, collection: Collection, name: &str) -> Result<String>;
}

/// Directory-backed source repository.
///
/// Layout: `<root>/<collection>/<name>.md`. Only markdown files are
/// enumerated; names are returned sorted.
pub struct DirRepo {
    root: PathBuf,
}

impl DirRepo {
    /// Create a repository rooted at the given content directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }
}

#[async_trait]
impl SourceRepo for DirRepo {
    async fn enumerate(&self, collection: Collection) -> Result<Vec<String>> {
        let dir = self.collection_dir(collection);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::invalid_content_root(dir));
            }
            Err(e) => return Err(Error::io(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(Error::io)? {
            let file_type = entry.file_type().await.map_err(Error::io)?;
            if !file_type.is_file() {
                continue;
            }
            let path = entry.path();
            let is_markdown = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| {
                    MARKDOWN_EXTENSIONS
                        .iter()
                        .any(|known| e.eq_ignore_ascii_case(known))
                });
            if is_markdown && let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn fetch(&self, collection: Collection, name: &str) -> Result<String> {
        // Names come from enumerate(); anything path-like is rejected
        // rather than resolved.
        if name.contains(['/', '\\']) || name.contains("..") {
            return Err(Error::source_not_found(collection.as_str(), name));
        }

        let path = self.collection_dir(collection).join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Error::source_not_found(collection.as_str(), name))
            }
            Err(e) => Err(Error::io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enumerate_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        std::fs::create_dir(&posts).unwrap();
        std::fs::write(posts.join("beta.md"), "b").unwrap();
        std::fs::write(posts.join("alpha.MD"), "a").unwrap();
        std::fs::write(posts.join("notes.markdown"), "n").unwrap();
        std::fs::write(posts.join("ignore.txt"), "x").unwrap();

        let repo = DirRepo::new(dir.path());
        let names = repo.enumerate(Collection::Posts).await.unwrap();
        assert_eq!(names, vec!["alpha.MD", "beta.md", "notes.markdown"]);
    }

    #[tokio::test]
    async fn test_fetch_returns_exact_contents() {
        let dir = tempfile::tempdir().unwrap();
        let resources = dir.path().join("resources");
        std::fs::create_dir(&resources).unwrap();
        std::fs::write(resources.join("links.md"), "---\ntitle: T\n---\nbody").unwrap();

        let repo = DirRepo::new(dir.path());
        let raw = repo.fetch(Collection::Resources, "links.md").await.unwrap();
        assert_eq!(raw, "---\ntitle: T\n---\nbody");
    }

    #[tokio::test]
    async fn test_fetch_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("posts")).unwrap();

        let repo = DirRepo::new(dir.path());
        let err = repo.fetch(Collection::Posts, "ghost.md").await.unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("posts")).unwrap();

        let repo = DirRepo::new(dir.path());
        let err = repo
            .fetch(Collection::Posts, "../outside.md")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }
}
