//! Content loader - walks the source tree and parses each file
//!
//! Parse failures are collected per file so one bad post never blocks the
//! rest of the run; only an unusable source root is fatal.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use super::frontmatter::HeaderError;
use super::{FrontMatter, Post};
use crate::error::{Error, Failure};

/// The result of one loading pass: every post that parsed, plus the per-file
/// failures.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub posts: Vec<Post>,
    pub failures: Vec<Failure>,
}

/// Loads content from the source directory
pub struct ContentLoader {
    source_dir: PathBuf,
}

impl ContentLoader {
    pub fn new<P: Into<PathBuf>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Load every content file under the source directory. Pure read; drafts
    /// are included and filtered later by the indexer.
    pub fn load(&self) -> Result<LoadOutcome> {
        if !self.source_dir.is_dir() {
            anyhow::bail!("source directory {:?} does not exist", self.source_dir);
        }

        let mut outcome = LoadOutcome::default();
        // slug -> source of the post that claimed it first
        let mut seen: HashMap<String, String> = HashMap::new();

        let mut files: Vec<PathBuf> = WalkDir::new(&self.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        // Deterministic order: the first path in sort order claims a slug
        files.sort();

        for path in files {
            let source = self.relative_name(&path);
            let slug = Post::slug_for(&path);

            match self.load_post(&path, &source) {
                Ok(post) => {
                    if let Some(first) = seen.get(&post.slug) {
                        outcome.failures.push(Failure::new(
                            post.slug.clone(),
                            Error::DuplicateSlug {
                                slug: post.slug,
                                first: first.clone(),
                                second: source,
                            },
                        ));
                    } else {
                        seen.insert(post.slug.clone(), source);
                        outcome.posts.push(post);
                    }
                }
                Err(error) => {
                    tracing::warn!("Failed to load {}: {}", source, error);
                    outcome.failures.push(Failure::new(slug, error));
                }
            }
        }

        Ok(outcome)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, source: &str) -> Result<Post, Error> {
        let content = fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        parse_post(path, source, &content).map_err(|e| Error::MalformedHeader {
            path: source.to_string(),
            source: e,
        })
    }

    fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

fn parse_post(path: &Path, source: &str, content: &str) -> Result<Post, HeaderError> {
    let (header, body) = FrontMatter::parse(content)?;
    let title = header.required_title()?;
    let date = header.required_date()?;

    Ok(Post {
        slug: Post::slug_for(path),
        title,
        date,
        draft: header.draft,
        tags: header.tags,
        body: body.to_string(),
        source: source.to_string(),
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
