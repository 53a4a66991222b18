//! Build the site
//!
//! One pass through the whole pipeline: load, index, render, publish.
//! Failures from every stage accumulate into the build report; the command
//! exits non-zero if the report is non-empty while still publishing every
//! valid document.

use std::time::Instant;

use anyhow::Result;

use crate::cache::{self, CacheDb};
use crate::content::loader::ContentLoader;
use crate::error::BuildReport;
use crate::generator::Generator;
use crate::indexer::SiteIndex;
use crate::publisher::Publisher;
use crate::Site;

pub fn run(site: &Site, force: bool) -> Result<()> {
    let start = Instant::now();

    let config_fingerprint = serde_yaml::to_string(&site.config)?;
    let corpus = cache::corpus_hash(&site.source_dir, &site.templates_dir, &config_fingerprint);
    let cached = CacheDb::load(&site.base_dir);
    if !force && cached.is_current(corpus) && site.output_dir.exists() {
        tracing::info!("No changes detected, skipping build");
        return Ok(());
    }

    let mut report = BuildReport::default();

    let loader = ContentLoader::new(&site.source_dir);
    let outcome = loader.load()?;
    tracing::info!(
        "Loaded {} posts ({} failed)",
        outcome.posts.len(),
        outcome.failures.len()
    );
    report.extend(outcome.failures);

    let index = SiteIndex::build(&outcome.posts, site.config.render_drafts);
    tracing::info!(
        "Indexed {} published posts across {} tags",
        index.published.len(),
        index.tags.len()
    );

    let templates_dir = site
        .templates_dir
        .is_dir()
        .then_some(site.templates_dir.as_path());
    let generator = Generator::new(&site.config, templates_dir)?;
    let (documents, render_failures) = generator.generate(&index);
    report.extend(render_failures);

    // Publishing starts only after all rendering has completed
    let publisher = Publisher::new(&site.output_dir);
    let published = publisher.publish(&documents);
    let assets = publisher.copy_assets(&site.source_dir);
    tracing::info!(
        "Wrote {} documents and {} assets",
        published.written,
        assets.written
    );
    report.extend(published.failures);
    report.extend(assets.failures);

    let elapsed = start.elapsed();
    if report.is_clean() {
        CacheDb::fresh(corpus).save(&site.base_dir)?;
        tracing::info!("Build finished in {:.2}s", elapsed.as_secs_f64());
        Ok(())
    } else {
        report.write_to(std::io::stderr())?;
        anyhow::bail!("build finished with {} failure(s)", report.failures.len())
    }
}
