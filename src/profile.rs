//! Mapping files for G600Linux
//!
//! Handles saving and loading mouse mappings as JSON documents.

use crate::mapping::{Built, ConfigFormat, MouseMapping};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load a mapping file in either format
pub fn load_mapping(path: &Path) -> Result<Built> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file {:?}", path))?;
    let built = MouseMapping::from_json(&content)
        .with_context(|| format!("Failed to load mapping from {:?}", path))?;

    for warning in &built.warnings {
        warn!("{}", warning);
    }
    info!("Loaded mapping from {:?}", path);
    Ok(built)
}

/// Save a mapping; refuses to replace an existing file unless `overwrite`
pub fn save_mapping(
    mapping: &MouseMapping,
    path: &Path,
    format: ConfigFormat,
    overwrite: bool,
) -> Result<()> {
    if path.exists() && !overwrite {
        bail!("{:?}: File already exists and overwrite-file flag not set", path);
    }

    let content = mapping.to_json(format)?;
    fs::write(path, content + "\n")
        .with_context(|| format!("Failed to write mapping file {:?}", path))?;

    info!("Saved mapping ({}) to {:?}", format, path);
    Ok(())
}
