use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One cleanup target from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDir {
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// User configuration: which directories to clean and how.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directories: Vec<TargetDir>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub secure_delete: bool,
    #[serde(default)]
    pub backup: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load from the given path, or the default location when none is
    /// given. A missing or broken config file is logged and replaced by
    /// the empty default, never a hard failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tidywin")
            .join("config.json")
    }

    /// Enabled targets only, in file order.
    pub fn enabled_directories(&self) -> impl Iterator<Item = &TargetDir> {
        self.directories.iter().filter(|d| d.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let json = r#"{
            "directories": [
                {"path": "%TEMP%", "description": "User temp files", "enabled": true},
                {"path": "C:\\Windows\\Temp", "description": "System temp", "enabled": false}
            ],
            "exclusions": ["%TEMP%\\keep"],
            "secure_delete": true,
            "backup": false
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.directories.len(), 2);
        assert_eq!(config.enabled_directories().count(), 1);
        assert!(config.secure_delete);
        assert!(!config.backup);
        assert_eq!(config.exclusions, vec!["%TEMP%\\keep"]);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"directories": [{"path": "/tmp/x"}]}"#).unwrap();
        assert!(config.directories[0].enabled);
        assert!(config.directories[0].description.is_empty());
        assert!(!config.secure_delete);
        assert!(config.exclusions.is_empty());
    }

    #[test]
    fn broken_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        let config = Config::load_or_default(Some(&path));
        assert!(config.directories.is_empty());
    }
}
