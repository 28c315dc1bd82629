use crate::verification::gateway::{Endpoint, GatewayBinding, LiveGatewaySettings};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "testing" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub id3global: Id3globalConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let id3global = Id3globalConfig {
            username: env::var("ID3GLOBAL_USERNAME").unwrap_or_default(),
            password: env::var("ID3GLOBAL_PASSWORD").unwrap_or_default(),
            use_pilot: env_flag("ID3GLOBAL_USE_PILOT")?,
            fake: env_flag("ID3GLOBAL_FAKE")?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            id3global,
        })
    }

    /// Chooses the gateway the verification service should be bound to.
    ///
    /// The test environment and the explicit fake switch always get the
    /// in-process fake. Everything else talks to the live service, on the
    /// pilot endpoint unless running in production without `use_pilot`.
    pub fn gateway_binding(&self) -> GatewayBinding {
        if self.id3global.fake || self.environment == AppEnvironment::Test {
            return GatewayBinding::Fake;
        }

        let endpoint =
            if self.id3global.use_pilot || self.environment != AppEnvironment::Production {
                Endpoint::Pilot
            } else {
                Endpoint::Production
            };

        GatewayBinding::Live(LiveGatewaySettings {
            username: self.id3global.username.clone(),
            password: self.id3global.password.clone(),
            endpoint,
        })
    }
}

fn env_flag(name: &'static str) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "" | "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { name, value: raw }),
        },
        Err(_) => Ok(false),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Credentials and endpoint switches for the ID3global service.
#[derive(Clone, Default)]
pub struct Id3globalConfig {
    pub username: String,
    pub password: String,
    pub use_pilot: bool,
    pub fake: bool,
}

impl fmt::Debug for Id3globalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Id3globalConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("use_pilot", &self.use_pilot)
            .field("fake", &self.fake)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidFlag { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
