//! Create a new content file

use std::fs;

use anyhow::Result;
use chrono::Local;

use crate::content::Post;
use crate::Site;

pub fn run(site: &Site, title: &str, draft: bool) -> Result<()> {
    let post_slug = slug::slugify(title);
    if post_slug.is_empty() {
        anyhow::bail!("title {:?} produces an empty slug", title);
    }

    fs::create_dir_all(&site.source_dir)?;

    let file_name = format!("{}.md", post_slug);
    let file_path = site.source_dir.join(&file_name);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let post = Post {
        slug: post_slug,
        title: title.to_string(),
        date: Local::now(),
        draft,
        tags: Vec::new(),
        body: String::new(),
        source: file_name,
    };
    fs::write(&file_path, post.to_file_string()?)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
