use std::env;
use std::fs;
use std::io;
use std::net::{AddrParseError, SocketAddr};

use serde::Deserialize;
use thiserror::Error;

const ENV_CONFIG: &str = "NOTES_SERVER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "env.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("cannot parse {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("bad listen address: {0}")]
    Addr(#[from] AddrParseError),
}

#[derive(Deserialize, Debug, Clone)]
pub struct DBParams {
    pub db: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

/// `env.json` next to the binary, or whatever `NOTES_SERVER_CONFIG` points
/// at. No `db` block means an in-memory store.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub token_ttl_hours: i64,
    pub static_dir: String,
    pub db: Option<DBParams>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5000".to_string(),
            token_ttl_hours: 6,
            static_dir: "frontend/dist".to_string(),
            db: None,
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&path, &text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no config at {path}, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    fn parse(path: &str, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_string(), source })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(self.addr.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ServerConfig::parse("test", r#"{"token_ttl_hours": 1}"#).unwrap();
        assert_eq!(config.token_ttl_hours, 1);
        assert_eq!(config.addr, "127.0.0.1:5000");
        assert!(config.db.is_none());
    }

    #[test]
    fn db_block_is_read() {
        let config = ServerConfig::parse("test", r#"{
            "addr": "0.0.0.0:8080",
            "db": {"db": "notes", "user": "notes", "password": "pw", "host": "localhost", "port": 5432}
        }"#).unwrap();
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.db.unwrap().port, 5432);
    }

    #[test]
    fn broken_config_is_an_error() {
        assert!(matches!(ServerConfig::parse("test", "{"), Err(ConfigError::Parse { .. })));
        let config = ServerConfig { addr: "nowhere".to_string(), ..ServerConfig::default() };
        assert!(config.socket_addr().is_err());
    }
}
