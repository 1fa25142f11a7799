#![forbid(unsafe_code)]

//! # keel
//!
//! Run a key sequence against a keel widget and print the final view and
//! the events it emitted.
//!
//! ```bash
//! keel table --remote --rows 56 --keys n
//! ```

use anyhow::Context;
use keel_demo::cli::Cli;
use keel_demo::config::DemoConfig;
use keel_demo::scenario;
use keel_style::{ColorProfile, set_default_profile};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::resolve(&cli).context("invalid configuration")?;
    tracing::debug!("resolved configuration:\n{}", config.to_diagnostic_string());
    if !config.color {
        set_default_profile(ColorProfile::Ascii);
    }

    let transcript = scenario::run(cli.widget, &config)?;
    print!("{transcript}");
    Ok(())
}
