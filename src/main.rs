use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use giorgos::app::App;
use giorgos::assets::{load_quotes, AssetBundle};
use giorgos::cli::Cli;
use giorgos::config::Tuning;
use giorgos::quotes::QuoteSet;
use giorgos::window::sdl::SdlSurface;
use giorgos::window::WindowConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tuning = Tuning::default();
    tuning.validate()?;

    let paths = cli.resolve_paths()?;
    info!("content directory: {}", paths.dir.display());

    let bundle = AssetBundle::load(&paths.idle, &paths.walk, &paths.gesture, tuning.size)
        .context("failed to load sprites")?;

    let quotes = if paths.quotes_explicit || paths.quotes.exists() {
        let lines = load_quotes(&paths.quotes).context("failed to load quote file")?;
        info!("loaded {} quotes", lines.len());
        QuoteSet::new(lines)
    } else {
        info!("no quote file found, running silent");
        QuoteSet::default()
    };

    let surface = SdlSurface::new(WindowConfig::new(tuning.size), bundle)
        .context("failed to create window")?;

    App::new(surface, tuning, quotes).run()
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
