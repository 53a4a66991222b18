//! inkpress: a batch static-content pipeline
//!
//! Loads front-matter content files, indexes them into a published feed and
//! tag collections, renders them through Tera templates, and writes the
//! output tree in a single pass.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod indexer;
pub mod publisher;
pub mod templates;

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Name of the site configuration file, looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The root of a site: configuration plus the resolved directory layout
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content source directory
    pub source_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Template override directory
    pub templates_dir: PathBuf,
}

impl Site {
    /// Create a site from a base directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        Self::with_overrides(base_dir, None, None)
    }

    /// Create a site, letting CLI flags override the configured source and
    /// output directories. Relative paths resolve against the base directory.
    pub fn with_overrides<P: AsRef<Path>>(
        base_dir: P,
        source: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let resolve = |dir: PathBuf| {
            if dir.is_absolute() {
                dir
            } else {
                base_dir.join(dir)
            }
        };
        let source_dir = resolve(source.unwrap_or_else(|| PathBuf::from(&config.source_dir)));
        let output_dir = resolve(output.unwrap_or_else(|| PathBuf::from(&config.output_dir)));
        let templates_dir = resolve(PathBuf::from(&config.templates_dir));

        Ok(Self {
            config,
            base_dir,
            source_dir,
            output_dir,
            templates_dir,
        })
    }

    /// Run the build pipeline
    pub fn build(&self, force: bool) -> Result<()> {
        commands::build::run(self, force)
    }

    /// Remove the output directory and cache
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config_file() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.title, "Inkpress");
        assert_eq!(site.source_dir, tmp.path().join("content"));
        assert_eq!(site.output_dir, tmp.path().join("public"));
    }

    #[test]
    fn test_cli_overrides_win_over_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "title: Configured\nsource_dir: posts\n",
        )
        .unwrap();

        let site = Site::with_overrides(
            tmp.path(),
            Some(PathBuf::from("elsewhere")),
            Some(PathBuf::from("/tmp/abs-out")),
        )
        .unwrap();
        assert_eq!(site.config.title, "Configured");
        assert_eq!(site.source_dir, tmp.path().join("elsewhere"));
        assert_eq!(site.output_dir, PathBuf::from("/tmp/abs-out"));
    }

    #[test]
    fn test_build_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(
            content.join("oldest.md"),
            "---\ntitle: Oldest\ndate: 2020-06-16\ntags: [history]\n---\nFirst words.\n",
        )
        .unwrap();
        fs::write(
            content.join("middle.md"),
            "---\ntitle: Middle\ndate: 2020-06-25\n---\nSecond words.\n",
        )
        .unwrap();
        fs::write(
            content.join("newest.md"),
            "---\ntitle: Newest\ndate: 2020-06-26\n---\nThird words.\n",
        )
        .unwrap();
        fs::write(
            content.join("secret.md"),
            "---\ntitle: Secret\ndate: 2020-06-27\ndraft: true\n---\nNot yet.\n",
        )
        .unwrap();

        let site = Site::new(tmp.path()).unwrap();
        site.build(false).unwrap();

        let feed = fs::read_to_string(site.output_dir.join("index.html")).unwrap();
        // Published list is date-descending and excludes the draft
        let pos = |needle: &str| feed.find(needle).unwrap();
        assert!(pos("Newest") < pos("Middle"));
        assert!(pos("Middle") < pos("Oldest"));
        assert!(!feed.contains("Secret"));

        assert!(site.output_dir.join("oldest/index.html").exists());
        assert!(site.output_dir.join("tags/history/index.html").exists());
        assert!(!site.output_dir.join("secret/index.html").exists());

        // The second run hits the cache and is a no-op
        site.build(false).unwrap();
    }

    #[test]
    fn test_build_reports_failing_slug_but_publishes_the_rest() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(
            content.join("good.md"),
            "---\ntitle: Good\ndate: 2020-06-16\n---\nFine.\n",
        )
        .unwrap();
        fs::write(content.join("bad.md"), "---\ndate: 2020-06-17\n---\nNo title.\n").unwrap();

        let site = Site::new(tmp.path()).unwrap();
        let err = site.build(false).unwrap_err();
        assert!(err.to_string().contains("1 failure"));

        // The valid post still made it out
        assert!(site.output_dir.join("good/index.html").exists());
        assert!(!site.output_dir.join("bad/index.html").exists());

        // A failed run must not mark the corpus as current
        let cached = cache::CacheDb::load(&site.base_dir);
        assert!(!cached.is_current(cache::corpus_hash(
            &site.source_dir,
            &site.templates_dir,
            &serde_yaml::to_string(&site.config).unwrap(),
        )));
    }
}
