//! CLI entry point for the autostereogram generator

use autostereo::io::cli::{Cli, FileProcessor};
use clap::Parser;

fn main() -> autostereo::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(FileProcessor::log_filter(&cli)),
    )
    .init();

    FileProcessor::new(cli).process()
}
