//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use swatchmeta_auth::TokenGrant;
use swatchmeta_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which term metadata store backs the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Persistent LMDB database under `data_dir`.
    #[default]
    Lmdb,
    /// Process-local map, lost on exit.
    Memory,
}

/// Configuration for the swatchmeta service.
///
/// Loaded from a TOML file via [`ServiceConfig::from_toml_file`]; CLI flags
/// override individual fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address to bind the HTTP server to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub store_backend: StoreBackend,

    /// Directory of the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Bearer tokens accepted by the service.
    #[serde(default)]
    pub tokens: Vec<TokenGrant>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./swatchmeta_data")
}

fn default_map_size_mb() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            store_backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            tokens: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Lmdb);
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(config.tokens.is_empty());
    }

    #[test]
    fn full_toml_is_parsed() {
        let config = ServiceConfig::from_toml_str(
            r#"
            listen_addr = "127.0.0.1"
            port = 9090
            store_backend = "memory"
            log_format = "json"
            map_size_mb = 8

            [[tokens]]
            token = "importer-secret"
            user = "importer"
            capabilities = ["edit_products"]
            "#,
        )
        .expect("should parse");
        assert_eq!(config.listen_addr, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.map_size_bytes(), 8 * 1024 * 1024);
        assert_eq!(config.tokens.len(), 1);
        assert_eq!(config.tokens[0].user, "importer");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(matches!(
            ServiceConfig::from_toml_str("store_backend = \"redis\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 7000").unwrap();
        let config = ServiceConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = ServiceConfig::from_toml_file(Path::new("/nonexistent/swatchmeta.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
