//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::indexer::SiteIndex;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(&site.source_dir);
    let outcome = loader.load()?;
    let index = SiteIndex::build(&outcome.posts, true);

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", index.published.len());
            for post in &index.published {
                let marker = if post.draft { " (draft)" } else { "" };
                println!(
                    "  {} - {} [{}]{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source,
                    marker
                );
            }
        }
        "tag" | "tags" => {
            println!("Tags ({}):", index.tags.len());
            let mut tags: Vec<_> = index.tags.iter().collect();
            tags.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
            for (tag, slugs) in tags {
                println!("  {} ({})", tag, slugs.len());
            }
        }
        "draft" | "drafts" => {
            let drafts: Vec<_> = index.published.iter().filter(|p| p.draft).collect();
            println!("Drafts ({}):", drafts.len());
            for post in drafts {
                println!("  {} [{}]", post.title, post.source);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, draft",
                content_type
            );
        }
    }

    if !outcome.failures.is_empty() {
        eprintln!("{} file(s) failed to load:", outcome.failures.len());
        for failure in &outcome.failures {
            eprintln!("  {}: {}", failure.slug, failure.error);
        }
    }

    Ok(())
}
