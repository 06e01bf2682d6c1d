//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Resolves the config file path from the process environment.
///
/// See [`resolve_config_path_with`].
///
/// # Errors
///
/// Returns an error if no config directory can be determined.
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    resolve_config_path_with(dir, |key| std::env::var(key).ok())
}

/// Resolves the config file path.
///
/// 1. `{dir}/config.toml` when `dir` is given.
/// 2. `$XDG_CONFIG_HOME/tvdb/config.toml` when set and non-empty.
/// 3. `$HOME/.config/tvdb/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path_with(
    dir: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    if let Some(xdg) = env("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join("tvdb").join("config.toml"));
    }

    let Some(home) = env("HOME") else {
        bail!("neither XDG_CONFIG_HOME nor HOME environment variable is set");
    };
    Ok(PathBuf::from(home)
        .join(".config")
        .join("tvdb")
        .join("config.toml"))
}
