use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use std::path::PathBuf;

use asicflow::config::Config;
use asicflow::server;

/// Near-real time sea ice mapping dashboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the overview map and per-area result folders
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8501
    #[arg(long)]
    address: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();
    builder.init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(address) = &cli.address {
        config = config.with_address(address)?;
    }

    server::run(&config)
}
