//! G600Linux - Logitech G600 Configuration Tool
//!
//! Copies button mappings between the mouse and JSON files, like cp.
//! MOUSE names the mouse; with no destination the mapping goes to stdout.

use anyhow::Result;
use clap::Parser;
use g600linux::cli::{Cli, Endpoint};
use g600linux::device::{self, HidControlInterface};
use g600linux::mapping::{ConfigFormat, MouseMapping};
use g600linux::profile;
use g600linux::settings::AppSettings;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = match &cli.settings {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load()?,
    };

    let mapping = read_source(&cli.source, &settings)?;
    let format = if cli.bytes {
        ConfigFormat::Bytes
    } else {
        ConfigFormat::HumanReadable
    };

    match &cli.destination {
        None => println!("{}", mapping.to_json(format)?),
        Some(Endpoint::Mouse) => {
            info!("Writing the mouse config to the mouse...");
            let mut iface = HidControlInterface::find(&settings)?;
            device::write_mapping(&mut iface, &mapping, &settings, cli.dry_run)?;
            info!("...done writing the mouse config to the mouse");
        }
        Some(Endpoint::File(path)) => {
            info!("Saving the mouse config to file {:?}...", path);
            profile::save_mapping(&mapping, path, format, cli.overwrite_file)?;
        }
    }

    Ok(())
}

fn read_source(source: &Endpoint, settings: &AppSettings) -> Result<MouseMapping> {
    match source {
        Endpoint::Mouse => {
            info!("Reading mouse config from mouse...");
            let mut iface = HidControlInterface::find(settings)?;
            let mapping = device::read_mapping(&mut iface, settings)?;
            info!("...done reading mouse config from mouse");
            Ok(mapping)
        }
        Endpoint::File(path) => {
            info!("Reading mouse config from file {:?}...", path);
            let built = profile::load_mapping(path)?;
            if !built.warnings.is_empty() {
                warn!(
                    "{} value(s) could not be represented exactly on the mouse",
                    built.warnings.len()
                );
            }
            Ok(built.mapping)
        }
    }
}
