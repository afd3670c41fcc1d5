use std::env;
use std::net::{IpAddr, SocketAddr};

/// Deployment stage of the dashboard; drives logging defaults only, the
/// access rules are identical everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Development,
    Test,
    Production,
}

impl Stage {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Runtime configuration, read once at startup from `CARE_*` variables (a
/// `.env` file is honored in development).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stage: Stage,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let stage = Stage::parse(&env_or("CARE_STAGE", "development"));
        let host = env_or("CARE_HOST", "127.0.0.1");
        let raw_port = env_or("CARE_PORT", "4000");
        let port = raw_port
            .parse::<u16>()
            .map_err(|source| ConfigError::Port {
                value: raw_port,
                source,
            })?;
        let log_filter = env_or("CARE_LOG", "info");

        Ok(Self {
            stage,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_filter },
        })
    }
}

/// Where the HTTP server binds.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `CARE_HOST` accepts an IP literal or the `localhost` shorthand.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host.parse().map_err(|source| ConfigError::Host {
                value: self.host.clone(),
                source,
            })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter handed to the telemetry installer.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CARE_PORT '{value}' is not a valid port number")]
    Port {
        value: String,
        source: std::num::ParseIntError,
    },
    #[error("CARE_HOST '{value}' is neither an IP address nor 'localhost'")]
    Host {
        value: String,
        source: std::net::AddrParseError,
    },
}
