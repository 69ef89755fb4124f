use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

pub const DEFAULT_ANALYSIS_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://daat.example/compass";

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub compass: CompassConfig,
    pub analysis: AnalysisConfig,
    pub reporting: ReportingConfig,
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

        let compass = CompassConfig {
            catalog_path: optional_var("COMPASS_CATALOG_PATH").map(PathBuf::from),
            results_path: optional_var("COMPASS_RESULTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/last_result.json")),
            share_base_url: optional_var("COMPASS_SHARE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SHARE_BASE_URL.to_string()),
            settle_delay: Duration::from_millis(parse_var("COMPASS_SETTLE_MS", 250)?),
            shuffle_questions: parse_flag("COMPASS_SHUFFLE", false)?,
            empty_axis_default: parse_var("COMPASS_EMPTY_AXIS_DEFAULT", 0.0)?,
        };

        let analysis = AnalysisConfig {
            api_key: optional_var("ANALYSIS_API_KEY"),
            base_url: optional_var("ANALYSIS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANALYSIS_BASE_URL.to_string()),
            model: optional_var("ANALYSIS_MODEL")
                .unwrap_or_else(|| DEFAULT_ANALYSIS_MODEL.to_string()),
            timeout: Duration::from_secs(parse_var("ANALYSIS_TIMEOUT_SECS", 20)?),
        };

        let reporting = ReportingConfig {
            url: optional_var("REPORTING_URL"),
            timeout: Duration::from_secs(parse_var("REPORTING_TIMEOUT_SECS", 10)?),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            compass,
            analysis,
            reporting,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_var(name) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { var: name, raw }),
        None => Ok(default),
    }
}

fn parse_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match optional_var(name) {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { var: name, raw }),
        },
        None => Ok(default),
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

/// Questionnaire behavior: catalog source, persistence slot, share links, and pacing.
#[derive(Debug, Clone)]
pub struct CompassConfig {
    pub catalog_path: Option<PathBuf>,
    pub results_path: PathBuf,
    pub share_base_url: String,
    pub settle_delay: Duration,
    pub shuffle_questions: bool,
    pub empty_axis_default: f64,
}

/// Remote generative analysis provider. Disabled when no API key is configured.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Outbound result reporting. Disabled when no URL is configured.
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    pub url: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { var: &'static str, raw: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { var, raw } => {
                write!(f, "{var} has an unusable value '{raw}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "COMPASS_CATALOG_PATH",
            "COMPASS_RESULTS_PATH",
            "COMPASS_SHARE_BASE_URL",
            "COMPASS_SETTLE_MS",
            "COMPASS_SHUFFLE",
            "COMPASS_EMPTY_AXIS_DEFAULT",
            "ANALYSIS_API_KEY",
            "ANALYSIS_BASE_URL",
            "ANALYSIS_MODEL",
            "ANALYSIS_TIMEOUT_SECS",
            "REPORTING_URL",
            "REPORTING_TIMEOUT_SECS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.compass.settle_delay, Duration::from_millis(250));
        assert!(!config.compass.shuffle_questions);
        assert!(config.compass.catalog_path.is_none());
        assert!(config.analysis.api_key.is_none());
        assert_eq!(config.analysis.model, DEFAULT_ANALYSIS_MODEL);
        assert!(config.reporting.url.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_compass_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("COMPASS_SETTLE_MS", "0");
        env::set_var("COMPASS_SHUFFLE", "yes");
        env::set_var("REPORTING_URL", "https://sheets.example/exec");
        env::set_var("ANALYSIS_API_KEY", "  ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.compass.settle_delay, Duration::ZERO);
        assert!(config.compass.shuffle_questions);
        assert_eq!(
            config.reporting.url.as_deref(),
            Some("https://sheets.example/exec")
        );
        assert!(config.analysis.api_key.is_none(), "blank key disables remote");
        reset_env();
    }

    #[test]
    fn rejects_malformed_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("COMPASS_SETTLE_MS", "soon");
        match AppConfig::load() {
            Err(ConfigError::InvalidValue { var, raw }) => {
                assert_eq!(var, "COMPASS_SETTLE_MS");
                assert_eq!(raw, "soon");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
        reset_env();
    }
}
