//! config.toml storage.
//!
//! Missing or empty files load as defaults so a first run needs no setup.
//! Saves go through a temporary file and a rename.

use crate::paths::HakonePaths;
use hakone_core::config::RootConfig;
use hakone_core::error::{HakoneError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads and saves [`RootConfig`] as TOML.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a storage handle for the default config.toml location.
    pub fn new() -> Result<Self> {
        let path = HakonePaths::config_file().map_err(|e| HakoneError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage handle for a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(RootConfig)`: Parsed file, or defaults if the file is missing or empty
    /// - `Err(HakoneError)`: The file exists but cannot be read or parsed
    pub fn load(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(RootConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(RootConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration, replacing the file atomically.
    pub fn save(&self, config: &RootConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hakone_core::persona::SHINKAI_YUTO;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(storage.load().unwrap(), RootConfig::default());
    }

    #[test]
    fn test_empty_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "\n  \n").unwrap();
        assert_eq!(
            ConfigStorage::with_path(path).load().unwrap(),
            RootConfig::default()
        );
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[chat\nmodel = ").unwrap();

        let err = ConfigStorage::with_path(path).load().unwrap_err();
        assert!(matches!(err, HakoneError::Serialization { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("sub").join("config.toml"));

        let mut config = RootConfig::default();
        config.chat.default_persona = Some(SHINKAI_YUTO.to_string());
        config.chat.reply_timeout_secs = 12;
        config.user_profile.nickname = "Onoda".to_string();
        storage.save(&config).unwrap();

        assert_eq!(storage.load().unwrap(), config);
        assert!(!storage.path().with_extension("toml.tmp").exists());
    }
}
