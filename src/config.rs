//! Client connection settings.
//!
//! Resolution order (later wins):
//!
//! 1. Built-in defaults (`localhost:5000`, millimeters)
//! 2. JSON file at `$LASER_API_CONFIG`, or `<config dir>/laser-api/config.json`
//! 3. `LASER_API_HOST`, `LASER_API_PORT`, `LASER_API_UNITS`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ipc::{DEFAULT_HOST, DEFAULT_PORT};
use crate::units::Units;

const CONFIG_PATH_VAR: &str = "LASER_API_CONFIG";
const HOST_VAR: &str = "LASER_API_HOST";
const PORT_VAR: &str = "LASER_API_PORT";
const UNITS_VAR: &str = "LASER_API_UNITS";

/// Connection parameters supplied at client construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub units: Units,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            units: Units::Mm,
        }
    }
}

impl ClientConfig {
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Load from the config file (if present) and the environment.
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!("Loaded client config from {}", path.display());
        Ok(config)
    }

    /// Overlay values from `lookup`, which maps variable names to values.
    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_VAR) {
            self.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {}", PORT_VAR, port))?;
        }
        if let Some(units) = lookup(UNITS_VAR) {
            self.units = units
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {} value", UNITS_VAR))?;
        }
        Ok(())
    }
}

/// `$LASER_API_CONFIG`, else the per-user config directory.
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("laser-api").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5000);
        assert_eq!(config.units, Units::Mm);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClientConfig::default();
        config
            .apply_env(lookup_from(&[
                ("LASER_API_HOST", "10.0.0.7"),
                ("LASER_API_PORT", " 5123 "),
                ("LASER_API_UNITS", "in"),
            ]))
            .unwrap();

        assert_eq!(
            config,
            ClientConfig {
                host: "10.0.0.7".to_string(),
                port: 5123,
                units: Units::Inches,
            }
        );
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_env(lookup_from(&[("LASER_API_PORT", "seventy")]))
            .unwrap_err();
        assert!(err.to_string().contains("LASER_API_PORT"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "laser-api-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"units": "inches"}"#).unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config, ClientConfig::default().with_units(Units::Inches));
    }
}
