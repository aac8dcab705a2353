use anyhow::Result;
use std::path::PathBuf;
use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_PATH: &str = "wander.db";
const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";
const DEFAULT_FORECAST_URL: &str = "https://api.darksky.net";
const DEFAULT_EVENTS_URL: &str = "https://www.eventbriteapi.com/v3";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Cache database settings
    pub database: DatabaseConfig,

    /// Geocoding API settings
    pub geocode: UpstreamConfig,

    /// Weather forecast API settings
    pub forecast: UpstreamConfig,

    /// Event search API settings
    pub events: UpstreamConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite cache database
    pub path: PathBuf,
}

/// Connection settings for one upstream API
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL requests are built against
    pub base_url: String,

    /// API key sent with every request
    pub api_key: String,
}

impl UpstreamConfig {
    fn from_env(url_var: &str, default_url: &str, key_var: &str) -> Self {
        Self {
            base_url: env_or(url_var, default_url),
            api_key: std::env::var(key_var).unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig { port: DEFAULT_PORT },
            database: DatabaseConfig {
                path: PathBuf::from(DEFAULT_DATABASE_PATH),
            },
            geocode: UpstreamConfig {
                base_url: DEFAULT_GEOCODE_URL.to_string(),
                api_key: String::new(),
            },
            forecast: UpstreamConfig {
                base_url: DEFAULT_FORECAST_URL.to_string(),
                api_key: String::new(),
            },
            events: UpstreamConfig {
                base_url: DEFAULT_EVENTS_URL.to_string(),
                api_key: String::new(),
            },
        }
    }
}

impl Config {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig { port: env_port() },
            database: DatabaseConfig {
                path: PathBuf::from(env_or("DATABASE_PATH", DEFAULT_DATABASE_PATH)),
            },
            geocode: UpstreamConfig::from_env(
                "GEOCODE_API_URL",
                DEFAULT_GEOCODE_URL,
                "GEOCODE_API_KEY",
            ),
            forecast: UpstreamConfig::from_env(
                "FORECAST_API_URL",
                DEFAULT_FORECAST_URL,
                "FORECAST_API_KEY",
            ),
            events: UpstreamConfig::from_env("EVENTS_API_URL", DEFAULT_EVENTS_URL, "EVENTS_API_KEY"),
        }
    }

    /// Load configuration from the environment and validate it
    ///
    /// Logs validation warnings and returns an error if validation fails
    /// with critical errors.
    pub fn load_validated() -> Result<Self> {
        let config = Self::from_env();
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_upstream(&self.geocode, "geocode", &mut result);
        self.validate_upstream(&self.forecast, "forecast", &mut result);
        self.validate_upstream(&self.events, "events", &mut result);

        if self.server.port == 0 {
            result.add_warning("server.port", "Port 0 binds an OS-assigned port");
        }

        // SQLite will not create missing parent directories
        if let Some(parent) = self.database.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                result.add_warning(
                    "database.path",
                    format!("Parent directory does not exist: {}", parent.display()),
                );
            }
        }

        result
    }

    fn validate_upstream(&self, upstream: &UpstreamConfig, name: &str, result: &mut ValidationResult) {
        self.validate_url(&upstream.base_url, format!("{}.base_url", name), result);

        if upstream.api_key.is_empty() {
            result.add_warning(
                format!("{}.api_key", name),
                "API key not set - upstream requests will be rejected",
            );
        }
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: String, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name.clone(),
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_port() -> u16 {
    match std::env::var("PORT") {
        Ok(raw) => match raw.parse() {
            Ok(port) => port,
            Err(_) => {
                tracing::warn!("Invalid PORT value {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }
        },
        Err(_) => DEFAULT_PORT,
    }
}
