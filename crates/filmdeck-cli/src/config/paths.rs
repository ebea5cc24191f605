//! Where the config file lives.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name under the config home.
const APP_DIR: &str = "filmdeck";
/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Returns the config file path.
///
/// `--dir` wins. Otherwise the file lives in `filmdeck/` under
/// `$XDG_CONFIG_HOME`, falling back to `~/.config`.
///
/// # Errors
///
/// Returns an error if no `--dir` is given and neither `XDG_CONFIG_HOME` nor
/// `HOME` is set.
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    let base = match dir {
        Some(d) => d.to_path_buf(),
        None => config_home(
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
        )?
        .join(APP_DIR),
    };
    Ok(base.join(CONFIG_FILE))
}

/// Picks the config home. An empty `XDG_CONFIG_HOME` counts as unset.
fn config_home(xdg: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(xdg) = xdg.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg));
    }
    let home = home.context("neither XDG_CONFIG_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".config"))
}
