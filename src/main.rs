//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "A batch static-content pipeline", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site
    #[command(alias = "b")]
    Build {
        /// Source directory (defaults to the configured source_dir)
        #[arg(long)]
        src: Option<PathBuf>,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Rebuild even when no change is detected
        #[arg(short, long)]
        force: bool,
    },

    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new content file
    New {
        /// Title of the new post
        title: String,

        /// Mark the new post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// List site content
    List {
        /// Type of content to list (post, tag, draft)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Remove the output directory and cache
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build { src, out, force } => {
            let site = inkpress::Site::with_overrides(&base_dir, src, out)?;
            site.build(force)?;
            println!("Build complete: {:?}", site.output_dir);
        }

        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            inkpress::commands::init::run(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { title, draft } => {
            let site = inkpress::Site::new(&base_dir)?;
            inkpress::commands::new::run(&site, &title, draft)?;
        }

        Commands::List { r#type } => {
            let site = inkpress::Site::new(&base_dir)?;
            inkpress::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = inkpress::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
