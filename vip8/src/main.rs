use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod keymap;
mod run;

fn main() -> Result<(), Box<dyn Error>> {
    // Log to stderr, filtered by RUST_LOG and defaulting to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from(config::Args::parse());
    run::run(config)
}
