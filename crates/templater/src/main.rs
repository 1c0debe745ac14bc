use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use templater::{Cli, RunConfig};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only rendered output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = RunConfig::from(Cli::parse());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    templater::run(&config, &mut out)?;
    Ok(())
}
