//! Build cache
//!
//! One content hash covers the source tree, template overrides, and
//! configuration. When it matches the previous fully-successful run the
//! build is skipped entirely; any change rebuilds everything. Deleting the
//! cache directory is always safe.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

const CACHE_FILE: &str = ".inkpress-cache/db.json";

/// Cache database persisted between runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheDb {
    /// Version of the cache format
    pub version: u32,
    /// Hash of everything that feeds a build
    pub corpus_hash: u64,
}

impl CacheDb {
    /// Current cache format version
    const VERSION: u32 = 1;

    /// Load cache from disk, or return an empty cache that matches nothing
    pub fn load(base_dir: &Path) -> Self {
        let cache_path = base_dir.join(CACHE_FILE);
        if let Ok(content) = fs::read_to_string(&cache_path) {
            if let Ok(cache) = serde_json::from_str::<CacheDb>(&content) {
                if cache.version == Self::VERSION {
                    return cache;
                }
                tracing::info!("Cache version mismatch, ignoring cache");
            }
        }
        Self::default()
    }

    /// Save cache to disk
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let cache_path = base_dir.join(CACHE_FILE);
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(cache_path, content)?;
        Ok(())
    }

    /// A cache recording a successful run over the given corpus
    pub fn fresh(corpus_hash: u64) -> Self {
        Self {
            version: Self::VERSION,
            corpus_hash,
        }
    }

    /// Whether a build over the given corpus can be skipped
    pub fn is_current(&self, corpus_hash: u64) -> bool {
        self.version == Self::VERSION && self.corpus_hash == corpus_hash
    }
}

/// Hash everything that feeds a build: the configuration fingerprint plus
/// every file under the source and template directories. Paths are sorted so
/// the hash is deterministic.
pub fn corpus_hash(source_dir: &Path, templates_dir: &Path, config_fingerprint: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    config_fingerprint.hash(&mut hasher);

    for dir in [source_dir, templates_dir] {
        if !dir.is_dir() {
            continue;
        }

        let mut paths: Vec<_> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        for path in paths {
            if let Ok(content) = fs::read(&path) {
                path.to_string_lossy().hash(&mut hasher);
                content.hash(&mut hasher);
            }
        }
    }

    hasher.finish()
}
