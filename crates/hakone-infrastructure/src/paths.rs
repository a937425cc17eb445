//! Unified path management for hakone configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/hakone/            # Config directory (platform config dir)
//! ├── config.toml              # Chat settings, user profile, log level
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── hakone.log.YYYY-MM-DD
//! ```

use hakone_core::config::{DEFAULT_GEMINI_MODEL, GeminiConfig, SecretConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "hakone";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

/// Unified path management for hakone.
pub struct HakonePaths;

impl HakonePaths {
    /// Returns the hakone configuration directory (e.g. `~/.config/hakone/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }

    /// Ensures the secret file exists, creating it with a template if it doesn't.
    ///
    /// On Unix the file is created with permissions 600.
    pub fn ensure_secret_file() -> Result<PathBuf, std::io::Error> {
        let secret_path = Self::secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        write_secret_template(&secret_path)?;
        Ok(secret_path)
    }
}

/// Writes an empty secret template unless the file already exists.
pub(crate) fn write_secret_template(secret_path: &Path) -> Result<(), std::io::Error> {
    if secret_path.exists() {
        return Ok(());
    }

    if let Some(parent) = secret_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let template_config = SecretConfig {
        gemini: Some(GeminiConfig {
            api_key: String::new(),
            model_name: Some(DEFAULT_GEMINI_MODEL.to_string()),
        }),
    };
    let template_json = serde_json::to_string_pretty(&template_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(secret_path, template_json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(secret_path, permissions)?;
    }

    Ok(())
}
