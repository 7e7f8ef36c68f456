use serde::Deserialize;
use std::net::SocketAddr;

use crate::catalog::{self, Pokemon};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub resources: ResourcesConfig,
    pub identify: IdentifyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub max_body_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResourcesConfig {
    pub static_dir: String,
}

/// Mock identifier tuning
#[derive(Debug, Deserialize, Clone)]
pub struct IdentifyConfig {
    /// Artificial processing delay in milliseconds
    pub delay_ms: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            // Double underscore separates nested keys, so SERVER_SERVER__PORT
            // maps to server.port and SERVER_LOGGING__ACCESS_LOG to
            // logging.access_log
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("resources.static_dir", "static")?
            .set_default("identify.delay_ms", 1500)?
            // Bare PORT wins over file and SERVER_* settings
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared application state
///
/// Everything here is read-only after startup, so all requests share a single
/// `Arc<AppState>` with no locking.
pub struct AppState {
    pub config: Config,
    pub catalog: Vec<Pokemon>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            catalog: catalog::catalog(),
        }
    }
}


#[cfg(test)]
impl AppState {
    /// State for handler tests: zero identification delay, temp static root
    pub fn for_tests() -> Self {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                show_headers: false,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                enable_cors: false,
                max_body_size: 10_485_760,
            },
            resources: ResourcesConfig {
                static_dir: "static".to_string(),
            },
            identify: IdentifyConfig { delay_ms: 0 },
        };
        Self::new(&config)
    }
}
