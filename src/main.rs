// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, load credentials and hand them to
//   the UI layer.
// - A missing token file or an aborted run exits with a failure status.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vk_photo_backup::{cli::Cli, config::Config, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_cli(&cli).context("Failed to load credentials")?;
    tracing::debug!(?config, "configuration loaded");

    ui::run(&cli, &config)?;
    Ok(())
}
