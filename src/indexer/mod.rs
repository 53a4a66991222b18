//! Index derivation - the published feed and the tag index
//!
//! Both collections are derived from the loaded posts on every run and never
//! persisted. Same input set, same ordering.

use indexmap::IndexMap;

use crate::content::Post;

/// Navigable collections over an immutable set of posts.
#[derive(Debug)]
pub struct SiteIndex {
    /// Published posts, date-descending. Equal dates break ties by slug
    /// ascending, so the order is total.
    pub published: Vec<Post>,

    /// Tag name to the slugs of published posts carrying it, in feed order.
    /// Tag iteration order is first-seen, which is itself feed order.
    pub tags: IndexMap<String, Vec<String>>,
}

impl SiteIndex {
    /// Build the index. Drafts are excluded unless `include_drafts` is set
    /// (local preview builds).
    pub fn build(posts: &[Post], include_drafts: bool) -> Self {
        let mut published: Vec<Post> = posts
            .iter()
            .filter(|p| include_drafts || !p.draft)
            .cloned()
            .collect();
        published.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        let mut tags: IndexMap<String, Vec<String>> = IndexMap::new();
        for post in &published {
            for tag in &post.tags {
                if tag.trim().is_empty() {
                    continue;
                }
                tags.entry(tag.clone()).or_default().push(post.slug.clone());
            }
        }

        Self { published, tags }
    }

    /// Look up a published post by slug.
    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.published.iter().find(|p| p.slug == slug)
    }
}
