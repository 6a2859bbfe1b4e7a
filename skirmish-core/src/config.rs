//! Client configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hex::Layout;

/// Settings shared by the CLI and the render bridge
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Center-to-corner hex size in pixels
    pub hex_size: f64,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hex_size: Layout::default().hex_size,
            port: 8080,
            static_dir: PathBuf::from("web"),
        }
    }
}

impl ClientConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        if !(config.hex_size.is_finite() && config.hex_size > 0.0) {
            anyhow::bail!("hex_size must be positive, got {}", config.hex_size);
        }
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.hex_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skirmish-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, r#"{"hex_size": 32.0}"#).unwrap();
        let config = ClientConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.hex_size, 32.0);
        assert_eq!(config.port, ClientConfig::default().port);
    }

    #[test]
    fn test_save_load() {
        let path = temp_path("saved");
        let config = ClientConfig {
            port: 9000,
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = ClientConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_bad_hex_size() {
        let path = temp_path("bad");
        std::fs::write(&path, r#"{"hex_size": 0.0}"#).unwrap();
        let result = ClientConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
