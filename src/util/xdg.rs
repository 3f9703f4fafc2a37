use crate::error::{Error, Result};
use std::env;
use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "venvman";

fn base_dir(var: &str, fallback: &str) -> Result<PathBuf> {
    if let Some(value) = env::var_os(var).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(value));
    }

    Ok(home_dir()?.join(fallback))
}

/// Get the XDG config directory for venvman
///
/// Returns `$XDG_CONFIG_HOME/venvman` or `~/.config/venvman` if not set
pub fn config_dir() -> Result<PathBuf> {
    Ok(base_dir("XDG_CONFIG_HOME", ".config")?.join(APP_DIR))
}

/// Get the XDG data directory for venvman
///
/// Returns `$XDG_DATA_HOME/venvman` or `~/.local/share/venvman` if not set
pub fn data_dir() -> Result<PathBuf> {
    Ok(base_dir("XDG_DATA_HOME", ".local/share")?.join(APP_DIR))
}

/// Path of the persisted configuration file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Default root directory holding virtual environments
pub fn default_venv_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("venvs"))
}

/// Get the home directory
pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|bd| bd.home_dir().to_path_buf())
        .ok_or_else(|| {
            Error::io(
                "Failed to determine home directory",
                PathBuf::from("~"),
                io::Error::new(io::ErrorKind::NotFound, "no home directory"),
            )
        })
}
