//! Document generation - turns the site index into rendered output documents
//!
//! The generator performs no I/O. It renders every page of the site into an
//! in-memory document list and leaves writing to the publisher, so a run
//! either has the full set of documents or an exact list of what failed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, Post};
use crate::error::{Error, Failure};
use crate::indexer::SiteIndex;
use crate::templates::TemplateRenderer;

/// A rendered output document, addressed relative to the output root.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub html: String,
}

#[derive(Debug, Serialize)]
struct SiteData {
    title: String,
    subtitle: String,
    description: String,
    author: String,
    url: String,
    root: String,
}

#[derive(Debug, Serialize)]
struct TagRef {
    name: String,
    slug: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct PostData {
    title: String,
    date: String,
    url: String,
    tags: Vec<TagRef>,
    content: String,
}

/// Renders the whole site from an index
pub struct Generator<'a> {
    config: &'a SiteConfig,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a SiteConfig, templates_dir: Option<&Path>) -> Result<Self> {
        Ok(Self {
            config,
            templates: TemplateRenderer::with_overrides(templates_dir)?,
            markdown: MarkdownRenderer::new(),
        })
    }

    /// Render every page of the site: one document per published post, the
    /// chronological feed, and one page per tag. Failing documents are
    /// collected; the rest still render.
    pub fn generate(&self, index: &SiteIndex) -> (Vec<Document>, Vec<Failure>) {
        let mut documents = Vec::new();
        let mut failures = Vec::new();

        let site = self.site_data();

        for post in &index.published {
            match self.render_post(post, &site) {
                Ok(doc) => documents.push(doc),
                Err(error) => failures.push(Failure::new(post.slug.clone(), error)),
            }
        }

        match self.render_feed(&index.published, &site) {
            Ok(doc) => documents.push(doc),
            Err(error) => failures.push(Failure::new("index", error)),
        }

        for (tag, slugs) in &index.tags {
            let posts: Vec<&Post> = slugs.iter().filter_map(|s| index.post(s)).collect();
            match self.render_tag(tag, &posts, &site) {
                Ok(doc) => documents.push(doc),
                Err(error) => failures.push(Failure::new(self.tag_path(tag), error)),
            }
        }

        (documents, failures)
    }

    fn render_post(&self, post: &Post, site: &SiteData) -> Result<Document, Error> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", &self.post_data(post));

        let html = self
            .templates
            .render("post.html", &context)
            .map_err(|e| Error::Template {
                slug: post.slug.clone(),
                source: e,
            })?;

        Ok(Document {
            path: PathBuf::from(&post.slug).join("index.html"),
            html,
        })
    }

    fn render_feed(&self, posts: &[Post], site: &SiteData) -> Result<Document, Error> {
        let data: Vec<PostData> = posts.iter().map(|p| self.post_data(p)).collect();

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("posts", &data);

        let html = self
            .templates
            .render("index.html", &context)
            .map_err(|e| Error::Template {
                slug: "index".to_string(),
                source: e,
            })?;

        Ok(Document {
            path: PathBuf::from("index.html"),
            html,
        })
    }

    fn render_tag(&self, tag: &str, posts: &[&Post], site: &SiteData) -> Result<Document, Error> {
        let data: Vec<PostData> = posts.iter().map(|p| self.post_data(p)).collect();

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("tag", &self.tag_ref(tag));
        context.insert("posts", &data);

        let html = self
            .templates
            .render("tag.html", &context)
            .map_err(|e| Error::Template {
                slug: self.tag_path(tag),
                source: e,
            })?;

        Ok(Document {
            path: PathBuf::from(self.tag_path(tag)).join("index.html"),
            html,
        })
    }

    fn site_data(&self) -> SiteData {
        SiteData {
            title: self.config.title.clone(),
            subtitle: self.config.subtitle.clone(),
            description: self.config.description.clone(),
            author: self.config.author.clone(),
            url: self.config.url.clone(),
            root: self.config.root.clone(),
        }
    }

    fn post_data(&self, post: &Post) -> PostData {
        PostData {
            title: post.title.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            url: format!("{}{}/", self.config.root, post.slug),
            tags: post.tags.iter().map(|t| self.tag_ref(t)).collect(),
            content: self.markdown.render(&post.body),
        }
    }

    fn tag_ref(&self, tag: &str) -> TagRef {
        let tag_slug = slug::slugify(tag);
        TagRef {
            name: tag.to_string(),
            url: format!("{}{}/", self.config.root, self.tag_path(tag)),
            slug: tag_slug,
        }
    }

    fn tag_path(&self, tag: &str) -> String {
        format!("{}/{}", self.config.tag_dir, slug::slugify(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    fn sample_posts() -> Vec<Post> {
        vec![
            Post {
                slug: "react-data-fetching".to_string(),
                title: "React Data Fetching".to_string(),
                date: Local.with_ymd_and_hms(2020, 6, 26, 0, 0, 0).unwrap(),
                draft: false,
                tags: vec!["react".to_string()],
                body: "# Fetching\n\nUse hooks.\n".to_string(),
                source: "react-data-fetching.md".to_string(),
            },
            Post {
                slug: "docker-ci".to_string(),
                title: "Docker CI".to_string(),
                date: Local.with_ymd_and_hms(2020, 6, 25, 0, 0, 0).unwrap(),
                draft: false,
                tags: vec!["docker".to_string(), "ci".to_string()],
                body: "Pipelines.\n".to_string(),
                source: "docker-ci.md".to_string(),
            },
        ]
    }

    #[test]
    fn test_generate_document_set() {
        let config = SiteConfig::default();
        let index = SiteIndex::build(&sample_posts(), false);
        let generator = Generator::new(&config, None).unwrap();

        let (documents, failures) = generator.generate(&index);
        assert!(failures.is_empty());

        let paths: Vec<String> = documents
            .iter()
            .map(|d| d.path.to_string_lossy().replace('\\', "/"))
            .collect();
        // 2 posts + feed + 3 tag pages
        assert_eq!(documents.len(), 6);
        assert!(paths.contains(&"react-data-fetching/index.html".to_string()));
        assert!(paths.contains(&"docker-ci/index.html".to_string()));
        assert!(paths.contains(&"index.html".to_string()));
        assert!(paths.contains(&"tags/react/index.html".to_string()));
        assert!(paths.contains(&"tags/docker/index.html".to_string()));
        assert!(paths.contains(&"tags/ci/index.html".to_string()));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = SiteConfig::default();
        let index = SiteIndex::build(&sample_posts(), false);
        let generator = Generator::new(&config, None).unwrap();

        let (one, _) = generator.generate(&index);
        let (two, _) = generator.generate(&index);
        let html = |docs: &[Document]| {
            docs.iter()
                .map(|d| d.html.clone())
                .collect::<Vec<_>>()
                .join("\u{0}")
        };
        assert_eq!(html(&one), html(&two));
    }

    #[test]
    fn test_markdown_body_reaches_post_page() {
        let config = SiteConfig::default();
        let index = SiteIndex::build(&sample_posts(), false);
        let generator = Generator::new(&config, None).unwrap();

        let (documents, _) = generator.generate(&index);
        let post_page = documents
            .iter()
            .find(|d| d.path.starts_with("react-data-fetching"))
            .unwrap();
        assert!(post_page.html.contains("<h1>Fetching</h1>"));
        assert!(post_page.html.contains("React Data Fetching"));
    }

    #[test]
    fn test_bad_template_override_fails_with_slug() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("post.html"), "{{ post.nonexistent_field }}").unwrap();

        let config = SiteConfig::default();
        let index = SiteIndex::build(&sample_posts(), false);
        let generator = Generator::new(&config, Some(tmp.path())).unwrap();

        let (documents, failures) = generator.generate(&index);
        // Both posts fail, feed and tag pages still render
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.error.kind() == "Template"));
        assert!(failures.iter().any(|f| f.slug == "docker-ci"));
        assert_eq!(documents.len(), 4);
    }
}
