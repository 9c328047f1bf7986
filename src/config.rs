//! Configuration management and validation.
//!
//! Provides configuration structures for storage locations, the reference
//! workbook, upload limits and logging, loaded in layers: built-in defaults,
//! then an optional TOML file, then `TOOL_CBD_` environment variables.

use crate::constants::{
    APP_CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_DATA_DIR, DEFAULT_DATABASE_FILE, DEFAULT_LIST_SHEET,
    DEFAULT_LOG_LEVEL, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_WORKBOOK_FILE, ENV_PREFIX,
};
use crate::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quotation database settings
    pub storage: StorageConfig,

    /// Reference workbook settings
    pub reference: ReferenceConfig,

    /// Upload boundary settings
    pub upload: UploadConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Where quotations are persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the database and the reference workbook
    pub data_dir: PathBuf,

    /// SQLite database file name inside `data_dir`
    pub database_file: String,
}

/// Reference spreadsheet holding the dropdown lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Workbook file name inside `data_dir`
    pub workbook_file: String,

    /// Sheet holding one column per dropdown
    pub list_sheet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            workbook_file: DEFAULT_WORKBOOK_FILE.to_string(),
            list_sheet: DEFAULT_LIST_SHEET.to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Default config file location (`<config dir>/tool-cbd/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// Load configuration using the layered approach (defaults -> file -> env)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            debug!("Merging config file: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::configuration(format!("Failed to load configuration: {}", e)))?;

        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_file.trim().is_empty() {
            return Err(Error::configuration("Database file name cannot be empty"));
        }

        if self.reference.workbook_file.trim().is_empty() {
            return Err(Error::configuration("Workbook file name cannot be empty"));
        }

        if self.reference.list_sheet.trim().is_empty() {
            return Err(Error::configuration("List sheet name cannot be empty"));
        }

        if self.upload.max_upload_bytes == 0 {
            return Err(Error::configuration(
                "Upload limit must be greater than 0 bytes",
            ));
        }

        Ok(())
    }

    /// Full path of the SQLite database
    pub fn database_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.database_file)
    }

    /// Full path of the reference workbook
    pub fn workbook_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.reference.workbook_file)
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_data_directory(&self) -> Result<()> {
        let data_dir = &self.storage.data_dir;
        if !data_dir.exists() {
            std::fs::create_dir_all(data_dir).map_err(|e| {
                Error::io(
                    format!("Failed to create data directory '{}'", data_dir.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.database_path(), PathBuf::from("data/tool_cost.db"));
        assert_eq!(config.workbook_path(), PathBuf::from("data/Tool_CBD.xlsx"));
        assert_eq!(config.reference.list_sheet, "List");
    }

    #[test]
    fn test_validation_rejects_zero_upload_limit() {
        let mut config = Config::default();
        config.upload.max_upload_bytes = 0;

        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_blank_database_file() {
        let mut config = Config::default();
        config.storage.database_file = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = Config::load_layered(Some(Path::new("/nonexistent/tool-cbd.toml")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_layered_loading_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [storage]
                data_dir = "/srv/quotes"
                database_file = "quotes.db"

                [upload]
                max_upload_bytes = 1024
                "#,
            )?;
            jail.set_env("TOOL_CBD_UPLOAD__MAX_UPLOAD_BYTES", "2048");

            let config = Config::load_layered(Some(Path::new("config.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.storage.data_dir, PathBuf::from("/srv/quotes"));
            assert_eq!(config.database_path(), PathBuf::from("/srv/quotes/quotes.db"));
            assert_eq!(config.upload.max_upload_bytes, 2048);
            assert_eq!(config.reference.workbook_file, "Tool_CBD.xlsx");
            Ok(())
        });
    }
}
