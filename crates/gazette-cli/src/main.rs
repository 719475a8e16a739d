//! Gazette CLI - Turn scraped news articles into a structured daily brief.

use clap::Parser;
use gazette_cli::commands;
use gazette_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> gazette_cli::Result<()> {
    let cli = Cli::parse();

    let path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load(&path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => {
            commands::execute_run(args, config.pipeline, &formatter)?;
        }
        Command::Classify(args) => {
            commands::execute_classify(args, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &path, &formatter)?;
        }
    }

    Ok(())
}
