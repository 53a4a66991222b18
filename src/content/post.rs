//! The post record

use std::path::Path;

use chrono::{DateTime, Local};

use super::frontmatter::{FrontMatter, DATE_FORMAT};

/// A single piece of content, created by the loader and read-only from then
/// on. Regeneration means reloading from disk, never mutating a loaded post.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique URL-safe identifier, derived from the file stem
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Drafts are excluded from published output
    pub draft: bool,

    /// Post tags
    pub tags: Vec<String>,

    /// Raw markup body
    pub body: String,

    /// Source file path relative to the content root
    pub source: String,
}

impl Post {
    /// Derive the slug for a content file from its stem.
    pub fn slug_for(path: &Path) -> String {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        slug::slugify(stem)
    }

    /// Re-serialize to the on-disk header/body shape. Loading the result
    /// yields the same field values.
    pub fn to_file_string(&self) -> Result<String, serde_yaml::Error> {
        let header = FrontMatter {
            title: Some(self.title.clone()),
            date: Some(self.date.format(DATE_FORMAT).to_string()),
            draft: self.draft,
            tags: self.tags.clone(),
        };
        Ok(format!("---\n{}---\n{}", header.to_yaml()?, self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_file_stem() {
        assert_eq!(
            Post::slug_for(Path::new("content/Fetching Data In React.md")),
            "fetching-data-in-react"
        );
        assert_eq!(Post::slug_for(Path::new("a/b/pytest-patterns.md")), "pytest-patterns");
    }

    #[test]
    fn test_file_round_trip() {
        let content = "---\ntitle: Jupyter Projects\ndate: 2020-06-26 12:00:00\ndraft: false\ntags:\n- jupyter\n- python\n---\nA list of notebook projects.\n";
        let (header, body) = FrontMatter::parse(content).unwrap();
        let post = Post {
            slug: "jupyter-projects".to_string(),
            title: header.required_title().unwrap(),
            date: header.required_date().unwrap(),
            draft: header.draft,
            tags: header.tags.clone(),
            body: body.to_string(),
            source: "jupyter-projects.md".to_string(),
        };

        let written = post.to_file_string().unwrap();
        let (header2, body2) = FrontMatter::parse(&written).unwrap();
        assert_eq!(header2.required_title().unwrap(), post.title);
        assert_eq!(header2.required_date().unwrap(), post.date);
        assert_eq!(header2.draft, post.draft);
        assert_eq!(header2.tags, post.tags);
        assert_eq!(body2, post.body);
    }
}
