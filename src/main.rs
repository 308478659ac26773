//! pixgal - Entry Point

use clap::Parser;
use pixgal::config::CliOverrides;
use pixgal::model::AppError;
use std::path::PathBuf;
use tracing::info;

/// pixgal - search and browse images from the terminal
#[derive(Parser, Debug)]
#[command(name = "pixgal")]
#[command(version)]
#[command(about = "Terminal image search gallery with incremental loading")]
pub struct Args {
    /// Search to run on startup
    pub query: Option<String>,

    /// API key (overrides config file and PIXGAL_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Images per page (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Load the next page when the load-more control scrolls into view
    #[arg(short, long)]
    pub auto_load: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_key: self.api_key.clone(),
            page_size: self.page_size,
            auto_load: self.auto_load,
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args, then validation
    let config = pixgal::config::resolve(args.config.clone(), args.overrides())?;

    pixgal::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    pixgal::view::run_with_config(&config, args.query)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}
