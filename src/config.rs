use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persisted settings, stored as `[General]` key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "General", default)]
    pub general: General,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct General {
    /// Root directory holding the virtual environments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venv_dir: Option<PathBuf>,

    /// Name of the active environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_venv: Option<String>,

    /// Interpreter used to create environments and as the system fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        config.normalize();
        Ok(config)
    }

    // Older files store a cleared selection as an empty string.
    fn normalize(&mut self) {
        let general = &mut self.general;
        if general.last_active_venv.as_deref().is_some_and(str::is_empty) {
            general.last_active_venv = None;
        }
        if general.python.as_deref().is_some_and(str::is_empty) {
            general.python = None;
        }
        if general
            .venv_dir
            .as_deref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            general.venv_dir = None;
        }
    }
}

/// A [`Config`] bound to the file it was loaded from
///
/// Every mutation rewrites the whole file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Load the config at `path`, falling back to defaults when it is missing
    /// or cannot be read
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => Config::parse(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring unparsable config file");
                Config::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Config::default()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable config file");
                Config::default()
            }
        };

        Self { path, config }
    }

    pub fn with_config(path: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn save(&self) -> Result<()> {
        write_config(&self.path, &self.config)
    }

    /// Apply `change` and persist the result
    ///
    /// The in-memory config only changes once the file has been written.
    pub fn update(&mut self, change: impl FnOnce(&mut General)) -> Result<()> {
        let mut updated = self.config.clone();
        change(&mut updated.general);
        write_config(&self.path, &updated)?;
        self.config = updated;
        Ok(())
    }

    pub fn active_venv(&self) -> Option<&str> {
        self.config.general.last_active_venv.as_deref()
    }

    pub fn set_active_venv(&mut self, name: Option<String>) -> Result<()> {
        self.update(|general| general.last_active_venv = name)
    }

    pub fn venv_dir(&self) -> Option<&Path> {
        self.config.general.venv_dir.as_deref()
    }

    pub fn set_venv_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.update(|general| general.venv_dir = Some(dir))
    }

    pub fn python(&self) -> Option<&str> {
        self.config.general.python.as_deref()
    }
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| Error::io("Failed to create config directory", parent, err))?;
    }

    let contents = toml::to_string_pretty(config).map_err(|err| {
        Error::io(
            "Failed to serialize config",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        )
    })?;
    fs::write(path, contents).map_err(|err| Error::io("Failed to write config file", path, err))?;

    debug!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::load(temp.path().join("config.toml"));
        assert_eq!(store.config(), &Config::default());
        assert!(store.active_venv().is_none());
        assert!(store.venv_dir().is_none());
    }

    #[test]
    fn test_round_trip_across_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let mut store = ConfigStore::load(&path);
        store.set_venv_dir(temp.path().join("envs")).unwrap();
        store.set_active_venv(Some("data".to_string())).unwrap();

        let reloaded = ConfigStore::load(&path);
        assert_eq!(reloaded.active_venv(), Some("data"));
        assert_eq!(reloaded.venv_dir(), Some(temp.path().join("envs").as_path()));
    }

    #[test]
    fn test_file_uses_general_section() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut store = ConfigStore::load(&path);
        store.set_active_venv(Some("web".to_string())).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[General]"));
        assert!(contents.contains("last_active_venv = \"web\""));
    }

    #[test]
    fn test_clearing_selection_removes_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut store = ConfigStore::load(&path);
        store.set_active_venv(Some("web".to_string())).unwrap();
        store.set_active_venv(None).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("last_active_venv"));
        assert!(ConfigStore::load(&path).active_venv().is_none());
    }

    #[test]
    fn test_failed_write_keeps_previous_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::create_dir_all(&path).unwrap();

        let mut store = ConfigStore::with_config(&path, Config::default());
        let err = store.set_active_venv(Some("web".to_string())).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(store.active_venv().is_none());

        assert!(store.set_venv_dir(temp.path().join("envs")).is_err());
        assert!(store.venv_dir().is_none());
    }

    #[test]
    fn test_empty_values_read_as_unset() {
        let config = Config::parse(
            "[General]\nvenv_dir = \"\"\nlast_active_venv = \"\"\npython = \"\"\n",
        )
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let store = ConfigStore::load(&path);
        assert_eq!(store.config(), &Config::default());
    }
}
