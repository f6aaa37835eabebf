use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/customers";
pub const DEFAULT_MONGO_DB: &str = "customers";

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub mongodb: MongoConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwaggerConfig {
    pub enabled: bool,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

impl CustomerConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config handles .env, APP__ prefix and PORT
        let common = core_config::Config::load()?;

        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        let swagger_enabled = get_env("SWAGGER_ENABLED", Some("true"), false)?
            .parse::<bool>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("SWAGGER_ENABLED must be a boolean: {}", e))
            })?;

        Ok(CustomerConfig {
            common,
            environment,
            service_name: get_env("SERVICE_NAME", Some("customer-service"), false)?,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            mongodb: MongoConfig {
                uri: get_env("MONGO_URI", Some(DEFAULT_MONGO_URI), is_prod)?,
                database: get_env("MONGO_DB", Some(DEFAULT_MONGO_DB), false)?,
            },
            swagger: SwaggerConfig {
                enabled: swagger_enabled,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, required: bool) -> Result<String, AppError> {
    resolve(key, env::var(key).ok(), default, required)
}

fn resolve(
    key: &str,
    value: Option<String>,
    default: Option<&str>,
    required: bool,
) -> Result<String, AppError> {
    match value {
        Some(val) => Ok(val),
        None if required => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        None => default.map(str::to_string).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
        }),
    }
}
