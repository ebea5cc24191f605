//! Data directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name of the favorites list inside the data directory.
const FAVORITES_FILE: &str = "favorites.json";

/// Resolves the data directory.
///
/// - If `dir` is `Some`, returns it unchanged.
/// - Otherwise returns `~/.local/share/filmdeck`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_data_dir(dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.to_path_buf());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("filmdeck"))
}

/// Resolves the favorites file path (`{data_dir}/favorites.json`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_favorites_path(dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_data_dir(dir)?.join(FAVORITES_FILE))
}
