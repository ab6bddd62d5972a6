use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_APP_NAME: &str = "java-mongo-service";
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

#[derive(Debug, Clone)]
pub struct DocsConfig {
    pub common: core_config::Config,
    /// Reported as `service` on /health and `from` on every /docs response.
    pub app_name: String,
    pub store: StoreConfig,
    pub mongodb: MongoConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    /// Falls back to the database named in `uri`, then to `test`.
    pub database: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl DocsConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Builds the service config from `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";

        let backend: StoreBackend = get_env(&lookup, "STORE_BACKEND", Some("mongo"), false)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // A memory-backed instance never dials MongoDB, so the URI is only mandatory for mongo.
        let uri_required = is_prod && backend == StoreBackend::Mongo;

        Ok(DocsConfig {
            common,
            app_name: lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            store: StoreConfig { backend },
            mongodb: MongoConfig {
                uri: get_env(&lookup, "MONGODB_URI", Some(DEFAULT_MONGODB_URI), uri_required)?,
                database: lookup("MONGODB_DATABASE").filter(|db| !db.is_empty()),
            },
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }

    /// Configuration for an in-process store, independent of the environment.
    pub fn in_memory(app_name: impl Into<String>) -> Self {
        DocsConfig {
            common: core_config::Config {
                port: 0,
                ..Default::default()
            },
            app_name: app_name.into(),
            store: StoreConfig {
                backend: StoreBackend::Memory,
            },
            mongodb: MongoConfig {
                uri: DEFAULT_MONGODB_URI.to_string(),
                database: None,
            },
            otlp_endpoint: None,
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, required: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if required {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
