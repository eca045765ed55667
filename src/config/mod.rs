use dashmap::DashMap;
use std::env;
use std::sync::Arc;
use thiserror::Error;

pub const HOST_KEY: &str = "FOOBARS_HOST";
pub const PORT_KEY: &str = "FOOBARS_PORT";
pub const LOG_KEY: &str = "FOOBARS_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Key/value configuration snapshot
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
        }

        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Settings the server needs at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive
    pub log: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_service(service: &ConfigService) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match service.get(PORT_KEY) {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: PORT_KEY,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.port,
        };

        let host = service.get_or(HOST_KEY, &defaults.host);
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: HOST_KEY,
                value: host,
                reason: "host must not be empty".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            log: service.get_or(LOG_KEY, &defaults.log),
        })
    }

    /// `host:port` as accepted by `tokio::net::TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
