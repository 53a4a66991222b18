//! Error taxonomy for the build pipeline
//!
//! Loader and renderer failures are collected per file rather than aborting
//! the run, so one bad post never blocks publishing the rest. The `build`
//! command turns the collected failures into a non-zero exit.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::HeaderError;

/// A failure in one stage of the pipeline, tied to a single document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed header in {path}: {source}")]
    MalformedHeader {
        path: String,
        #[source]
        source: HeaderError,
    },

    #[error("duplicate slug `{slug}`: {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template error for `{slug}`: {source}")]
    Template {
        slug: String,
        #[source]
        source: tera::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Short kind name used in failure summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedHeader { .. } => "MalformedHeader",
            Error::DuplicateSlug { .. } => "DuplicateSlug",
            Error::Read { .. } => "Read",
            Error::Template { .. } => "Template",
            Error::Write { .. } => "Write",
        }
    }
}

/// A single failing document: the slug (or output path, for aggregate pages
/// and assets) and what went wrong with it.
#[derive(Debug)]
pub struct Failure {
    pub slug: String,
    pub error: Error,
}

impl Failure {
    pub fn new(slug: impl Into<String>, error: Error) -> Self {
        Self {
            slug: slug.into(),
            error,
        }
    }
}

/// Aggregate outcome of a run. Failures from every stage accumulate here;
/// the run succeeds only if the report stays empty.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub failures: Vec<Failure>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn extend(&mut self, failures: Vec<Failure>) {
        self.failures.extend(failures);
    }

    /// Write one line per failure, suitable for standard error.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        for failure in &self.failures {
            writeln!(
                out,
                "{}: {}: {}",
                failure.slug,
                failure.error.kind(),
                failure.error
            )?;
        }
        Ok(())
    }
}
