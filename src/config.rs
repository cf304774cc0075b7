use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub function: FunctionSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub instructor_profiles: String,
    pub contact_requests: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionSettings {
    pub increment_views: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocoder_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            user_agent: default_geocoder_user_agent(),
            timeout_secs: default_geocoder_timeout_secs(),
        }
    }
}

fn default_geocoder_endpoint() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}
fn default_geocoder_user_agent() -> String {
    format!("fairway-search/{}", env!("CARGO_PKG_VERSION"))
}
fn default_geocoder_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

fn default_list_limit() -> usize { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with FAIRWAY_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with FAIRWAY_)
            // e.g., FAIRWAY_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FAIRWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute environment variables in string values
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FAIRWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute credential values from the environment
///
/// Deployment targets inject Appwrite credentials as plain variables rather
/// than through the prefixed hierarchy.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let appwrite_endpoint = env::var("FAIRWAY_APPWRITE__ENDPOINT")
        .or_else(|_| env::var("APPWRITE_ENDPOINT"))
        .ok();
    let appwrite_api_key = env::var("FAIRWAY_APPWRITE__API_KEY")
        .or_else(|_| env::var("APPWRITE_API_KEY"))
        .ok();
    let appwrite_project_id = env::var("FAIRWAY_APPWRITE__PROJECT_ID")
        .or_else(|_| env::var("APPWRITE_PROJECT_ID"))
        .ok();
    let appwrite_database_id = env::var("FAIRWAY_APPWRITE__DATABASE_ID")
        .or_else(|_| env::var("APPWRITE_DATABASE_ID"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = appwrite_endpoint {
        builder = builder.set_override("appwrite.endpoint", endpoint)?;
    }
    if let Some(api_key) = appwrite_api_key {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Some(project_id) = appwrite_project_id {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }
    if let Some(database_id) = appwrite_database_id {
        builder = builder.set_override("appwrite.database_id", database_id)?;
    }

    builder.build()
}
