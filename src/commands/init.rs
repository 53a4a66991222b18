//! Initialize a new site

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::Local;

use crate::content::Post;
use crate::CONFIG_FILE;

/// Scaffold a new site: config file, content directory, sample post.
pub fn run(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content"))?;
    fs::create_dir_all(target_dir.join("templates"))?;

    let config_content = r#"# Site
title: Inkpress
subtitle: ''
description: ''
author: ''

# URL
url: http://example.com
root: /

# Directory
source_dir: content
output_dir: public
templates_dir: templates
tag_dir: tags

# Writing
render_drafts: false
"#;
    fs::write(&config_path, config_content)?;

    let sample = Post {
        slug: "hello-world".to_string(),
        title: "Hello World".to_string(),
        date: Local::now(),
        draft: false,
        tags: Vec::new(),
        body: "Welcome to your new site. Edit or delete this post, then run `inkpress build`.\n"
            .to_string(),
        source: "hello-world.md".to_string(),
    };
    fs::write(
        target_dir.join("content/hello-world.md"),
        sample.to_file_string()?,
    )?;

    Ok(())
}
