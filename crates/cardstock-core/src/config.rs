//! Configuration types for the content pipeline.
//!
//! Follows a builder pattern for configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default like service base URL (local dev server).
pub const DEFAULT_LIKE_API_BASE: &str = "http://127.0.0.1:3000";

/// Configuration for a cardstock site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Root directory holding one subdirectory per collection
    pub content_root: PathBuf,
    /// Base URL of the remote like service
    pub like_api_base: String,
    /// Optional path for the persistent local like store;
    /// `None` keeps liked state in memory only
    pub like_store_path: Option<PathBuf>,
}

impl SiteConfig {
    /// Create a new site config with builder
    pub fn builder(content_root: impl Into<PathBuf>) -> SiteConfigBuilder {
        SiteConfigBuilder::new(content_root)
    }

    /// Validate the site configuration
    pub fn validate(&self) -> Result<()> {
        if !self.content_root.exists() {
            return Err(Error::config_error(format!(
                "Content root does not exist: {}",
                self.content_root.display()
            )));
        }

        if !self.content_root.is_dir() {
            return Err(Error::config_error(format!(
                "Content root is not a directory: {}",
                self.content_root.display()
            )));
        }

        if !self.like_api_base.starts_with("http://") && !self.like_api_base.starts_with("https://")
        {
            return Err(Error::config_error(format!(
                "Like service base URL must be http(s): {}",
                self.like_api_base
            )));
        }

        Ok(())
    }
}

/// Builder for [`SiteConfig`]
pub struct SiteConfigBuilder {
    content_root: PathBuf,
    like_api_base: String,
    like_store_path: Option<PathBuf>,
}

impl SiteConfigBuilder {
    /// Start a builder rooted at the given content directory
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            like_api_base: DEFAULT_LIKE_API_BASE.to_string(),
            like_store_path: None,
        }
    }

    /// Override the like service base URL
    pub fn like_api_base(mut self, base: impl Into<String>) -> Self {
        self.like_api_base = base.into();
        self
    }

    /// Persist liked state to the given file
    pub fn like_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.like_store_path = Some(path.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SiteConfig> {
        let config = SiteConfig {
            content_root: self.content_root,
            like_api_base: self.like_api_base,
            like_store_path: self.like_store_path,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::builder(dir.path())
            .like_api_base("https://example.com")
            .build()
            .unwrap();
        assert_eq!(config.like_api_base, "https://example.com");
        assert!(config.like_store_path.is_none());
    }

    #[test]
    fn test_missing_content_root_rejected() {
        let result = SiteConfig::builder("/definitely/not/a/real/dir").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_non_http_api_base_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = SiteConfig::builder(dir.path())
            .like_api_base("ftp://example.com")
            .build();
        assert!(result.is_err());
    }
}
