//! Publisher - writes rendered documents into the output tree
//!
//! A failed write affects that document only; everything else is still
//! attempted and the outcome names every path that was not written. There is
//! no partial silent success.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Failure};
use crate::generator::Document;

/// Outcome of a publish pass.
#[derive(Debug, Default)]
pub struct PublishOutcome {
    pub written: usize,
    pub failures: Vec<Failure>,
}

/// Writes documents and assets under a single output root
pub struct Publisher {
    output_dir: PathBuf,
}

impl Publisher {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write every document, creating directories as needed.
    pub fn publish(&self, documents: &[Document]) -> PublishOutcome {
        let mut outcome = PublishOutcome::default();
        let mut seen_dirs: HashSet<PathBuf> = HashSet::new();

        for doc in documents {
            let target = self.output_dir.join(&doc.path);
            match write_file(&target, doc.html.as_bytes(), &mut seen_dirs) {
                Ok(()) => {
                    outcome.written += 1;
                    tracing::debug!("Wrote {:?}", target);
                }
                Err(source) => {
                    tracing::warn!("Failed to write {:?}: {}", target, source);
                    outcome.failures.push(Failure::new(
                        doc.path.to_string_lossy().to_string(),
                        Error::Write {
                            path: target,
                            source,
                        },
                    ));
                }
            }
        }

        outcome
    }

    /// Copy non-content files (images, stylesheets) through unchanged,
    /// preserving their relative paths.
    pub fn copy_assets(&self, source_dir: &Path) -> PublishOutcome {
        let mut outcome = PublishOutcome::default();
        let mut seen_dirs: HashSet<PathBuf> = HashSet::new();

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_content_file(path) {
                continue;
            }

            let relative = match path.strip_prefix(source_dir) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            let target = self.output_dir.join(relative);

            match copy_file(path, &target, &mut seen_dirs) {
                Ok(()) => outcome.written += 1,
                Err(source) => {
                    tracing::warn!("Failed to copy asset {:?}: {}", path, source);
                    outcome.failures.push(Failure::new(
                        relative.to_string_lossy().to_string(),
                        Error::Write {
                            path: target,
                            source,
                        },
                    ));
                }
            }
        }

        outcome
    }
}

fn write_file(target: &Path, bytes: &[u8], seen_dirs: &mut HashSet<PathBuf>) -> io::Result<()> {
    ensure_parent(target, seen_dirs)?;
    fs::write(target, bytes)
}

fn copy_file(source: &Path, target: &Path, seen_dirs: &mut HashSet<PathBuf>) -> io::Result<()> {
    ensure_parent(target, seen_dirs)?;
    fs::copy(source, target)?;
    Ok(())
}

fn ensure_parent(target: &Path, seen_dirs: &mut HashSet<PathBuf>) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        if seen_dirs.insert(parent.to_path_buf()) {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
