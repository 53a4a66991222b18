//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub output_dir: String,
    pub templates_dir: String,
    pub tag_dir: String,

    // Writing
    pub render_drafts: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Inkpress".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "content".to_string(),
            output_dir: "public".to_string(),
            templates_dir: "templates".to_string(),
            tag_dir: "tags".to_string(),

            render_drafts: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Inkpress");
        assert_eq!(config.source_dir, "content");
        assert_eq!(config.output_dir, "public");
        assert!(!config.render_drafts);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
source_dir: posts
render_drafts: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.source_dir, "posts");
        assert!(config.render_drafts);
        // Unspecified fields fall back to defaults
        assert_eq!(config.output_dir, "public");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(SiteConfig::load("/nonexistent/_config.yml").is_err());
    }
}
