use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an alternate config file
pub const CONFIG_PATH_ENV: &str = "REVIEW_INTAKE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            debug: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then `HOST`/`PORT`/`DEBUG`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = Self::from_file(&path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Read a TOML file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { name: "PORT", value: port.clone() })?;
        }

        if let Some(debug) = lookup("DEBUG") {
            self.server.debug = parse_flag(&debug);
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config() {
        let c = AppConfig::default();
        assert_eq!(c.server.host, "127.0.0.1");
        assert_eq!(c.server.port, 5000);
        assert!(!c.server.debug);
        assert_eq!(c.server.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = AppConfig::from_toml("[server]\nport = 8080\n").unwrap();
        assert_eq!(c.server.port, 8080);
        assert_eq!(c.server.host, "127.0.0.1");

        let empty = AppConfig::from_toml("").unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml("[server]\nport = \"eighty\"\n").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let c = AppConfig::from_file(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(c, AppConfig::default());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut c = AppConfig::from_toml("[server]\nhost = \"10.0.0.1\"\nport = 9000\n").unwrap();
        c.apply_env(env(&[("HOST", "0.0.0.0"), ("PORT", "8000"), ("DEBUG", "True")]))
            .unwrap();

        assert_eq!(c.server.bind_addr(), "0.0.0.0:8000");
        assert!(c.server.debug);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut c = AppConfig::default();
        let err = c.apply_env(env(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "PORT", .. }));
    }

    #[test]
    fn debug_flag_values() {
        for on in ["1", "true", "YES", " on "] {
            assert!(parse_flag(on), "{on}");
        }
        for off in ["0", "false", "", "nope"] {
            assert!(!parse_flag(off), "{off}");
        }
    }
}
