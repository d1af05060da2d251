use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Giorgos - an animated desktop companion
#[derive(Parser, Debug)]
#[command(name = "giorgos")]
#[command(version)]
#[command(about = "Animated desktop companion that follows the pointer", long_about = None)]
pub struct Cli {
    /// Directory containing the sprite and quote files (defaults to the
    /// executable's directory)
    #[arg(short, long, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Quote file (defaults to quotes.txt in the content directory)
    #[arg(short, long, value_name = "FILE")]
    pub quotes: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved locations of the files the companion loads at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPaths {
    pub dir: PathBuf,
    pub idle: PathBuf,
    pub walk: PathBuf,
    pub gesture: PathBuf,
    pub quotes: PathBuf,
    /// True when `--quotes` was given explicitly; a missing explicit file
    /// is fatal, a missing default one just means no quotes.
    pub quotes_explicit: bool,
}

impl Cli {
    /// Resolve asset paths relative to the content directory.
    ///
    /// Without `--content-dir` the assets are expected next to the
    /// executable, matching how the companion is shipped.
    pub fn resolve_paths(&self) -> Result<ContentPaths> {
        let dir = match &self.content_dir {
            Some(dir) => dir.clone(),
            None => {
                let exe = std::env::current_exe().context("cannot locate executable")?;
                exe.parent()
                    .context("executable has no parent directory")?
                    .to_path_buf()
            }
        };

        Ok(ContentPaths {
            idle: dir.join("giorgos1.png"),
            walk: dir.join("giorgoswalkleft.png"),
            gesture: dir.join("giorgos2.png"),
            quotes: self
                .quotes
                .clone()
                .unwrap_or_else(|| dir.join("quotes.txt")),
            quotes_explicit: self.quotes.is_some(),
            dir,
        })
    }
}
