//! CLI entry point for sitepost

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sitepost")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "Post-processes a generated static site", long_about = None)]
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
    /// Inspect every output page, then run the post-write hooks
    #[command(alias = "b")]
    Build,

    /// Add heading anchors and render math in every output page
    Inspect,

    /// Run the highlighter and mark <pre> tags
    Highlight,

    /// Print the summary of a content file
    Summary {
        /// Content file (markdown or HTML, with optional front-matter)
        file: PathBuf,
    },

    /// Decode entities and strip markup characters from text
    PlainText {
        /// Text to sanitize
        text: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "sitepost=debug,info"
    } else {
        "sitepost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Build => {
            let site = sitepost::Site::new(&base_dir)?;
            tracing::info!("Post-processing {:?}", site.output_dir);
            site.build()?;
            println!("Post-processed successfully!");
        }

        Commands::Inspect => {
            let site = sitepost::Site::new(&base_dir)?;
            let changed = site.inspect()?;
            println!("Inspected pages, {} changed", changed);
        }

        Commands::Highlight => {
            let site = sitepost::Site::new(&base_dir)?;
            site.highlight()?;
            println!("Highlighted successfully!");
        }

        Commands::Summary { file } => {
            let site = sitepost::Site::new(&base_dir)?;
            println!("{}", site.summary(&file)?);
        }

        Commands::PlainText { text } => {
            println!("{}", sitepost::helpers::plain_text(&text));
        }

        Commands::Version => {
            println!("sitepost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
