// ABOUTME: Server configuration loaded from TOML with environment overrides
// ABOUTME: Covers the catalog location, HTTP binding and logging

use crate::error::{Result, ServerError};
use jazz_improv_core::KnowledgeStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_ENV: &str = "JAZZ_MCP_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "jazz-improv-mcp.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub knowledge: KnowledgeConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Where the two catalog documents live. Unset means the bundled catalogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub keep_alive_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            keep_alive_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// stdio sessions log here instead of stderr when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl KnowledgeConfig {
    pub fn load_store(&self) -> Result<KnowledgeStore> {
        let store = match &self.data_dir {
            Some(dir) => KnowledgeStore::load_dir(dir)?,
            None => KnowledgeStore::builtin()?,
        };
        Ok(store)
    }
}

impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ServerConfig {
    /// Load configuration with the following precedence:
    /// 1. `explicit` path (the `--config` flag)
    /// 2. `JAZZ_MCP_CONFIG`
    /// 3. `./jazz-improv-mcp.toml`
    /// 4. Defaults
    ///
    /// Environment overrides are applied last, then the result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Err(e) = dotenv::dotenv() {
            if !e.not_found() {
                warn!("Failed to load .env file: {}", e);
            }
        }

        let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let path = explicit.map(Path::to_path_buf).or(env_path).or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });

        let mut config = match &path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("JAZZ_MCP_DATA_DIR") {
            self.knowledge.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(host) = lookup("JAZZ_MCP_HOST") {
            self.http.host = host;
        }
        if let Some(port) = lookup("JAZZ_MCP_PORT") {
            match port.parse() {
                Ok(port) => self.http.port = port,
                Err(_) => warn!("Ignoring invalid JAZZ_MCP_PORT '{}'", port),
            }
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.host.trim().is_empty() {
            return Err(ServerError::config("http.host cannot be empty"));
        }
        if self.http.port == 0 {
            return Err(ServerError::config("http.port must be greater than 0"));
        }
        if let Some(dir) = &self.knowledge.data_dir {
            if !dir.is_dir() {
                return Err(ServerError::config(format!(
                    "knowledge.data_dir '{}' is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.http.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.logging.level, "info");
        assert!(config.knowledge.data_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            [http]
            port = 8088
            "#,
        )
        .unwrap();
        assert_eq!(config.http.port, 8088);
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.keep_alive_seconds, 15);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = ServerConfig::from_toml_str("[http\nport = ").unwrap_err();
        assert!(matches!(err, ServerError::ConfigParse(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("JAZZ_MCP_HOST", "0.0.0.0"),
            ("JAZZ_MCP_PORT", "9000"),
            ("RUST_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = ServerConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.http.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.logging.level, "debug");
        assert!(config.knowledge.data_dir.is_none());
    }

    #[test]
    fn test_bad_port_override_is_ignored() {
        let mut config = ServerConfig::default();
        config.apply_overrides(|key| (key == "JAZZ_MCP_PORT").then(|| "http".to_string()));
        assert_eq!(config.http.port, 3000);
    }

    #[test]
    fn test_validation() {
        let mut config = ServerConfig::default();
        config.http.host = " ".to_string();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        let mut config = ServerConfig::default();
        config.http.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.knowledge.data_dir = Some(PathBuf::from("/definitely/not/here"));
        assert!(config.validate().is_err());

        let dir = TempDir::new().unwrap();
        config.knowledge.data_dir = Some(dir.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(
            &path,
            "[logging]\nlevel = \"warn\"\nlog_dir = \"/tmp/jazz\"\n",
        )
        .unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.log_dir, Some(PathBuf::from("/tmp/jazz")));

        let missing = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ServerError::Io(_)));
    }

    #[test]
    fn test_builtin_store_when_data_dir_unset() {
        let store = KnowledgeConfig::default().load_store().unwrap();
        assert_eq!(store.foundations().len(), 4);
    }
}
