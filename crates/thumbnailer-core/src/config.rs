//! Configuration module
//!
//! Configuration is read once at startup from the environment (after loading
//! an optional `.env` file) and is immutable afterwards.

use std::env;

use crate::constants::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_SERVER_PORT, DEFAULT_THUMBNAIL_PREFIX,
};
use crate::models::ThumbnailSpec;
use crate::naming::{validate_prefix, NamingPolicy};
use crate::storage_types::StorageBackend;

/// Storage backend selection and its connection settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Default bucket; the S3 backend keeps a pre-built client for it.
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, GCS interop, etc.)
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub thumbnail: ThumbnailSpec,
    pub thumbnail_prefix: String,
    pub storage: StorageConfig,
    pub server_port: u16,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thumbnail: ThumbnailSpec::default(),
            thumbnail_prefix: DEFAULT_THUMBNAIL_PREFIX.to_string(),
            storage: StorageConfig::default(),
            server_port: DEFAULT_SERVER_PORT,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_width = parse_number(&lookup, "THUMBNAIL_MAX_WIDTH", DEFAULT_MAX_WIDTH)?;
        let max_height = parse_number(&lookup, "THUMBNAIL_MAX_HEIGHT", DEFAULT_MAX_HEIGHT)?;
        let allow_enlargement = lookup("THUMBNAIL_ALLOW_ENLARGEMENT")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        let thumbnail_prefix = lookup("THUMBNAIL_PREFIX")
            .unwrap_or_else(|| DEFAULT_THUMBNAIL_PREFIX.to_string());

        let backend = lookup("STORAGE_BACKEND")
            .map(|v| v.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(StorageBackend::S3);

        let storage = StorageConfig {
            backend,
            s3_bucket: lookup("S3_BUCKET"),
            s3_region: lookup("S3_REGION").or_else(|| lookup("AWS_REGION")),
            s3_endpoint: lookup("S3_ENDPOINT"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
        };

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = lookup("PORT")
            .unwrap_or_else(|| DEFAULT_SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let config = Config {
            thumbnail: ThumbnailSpec {
                max_width,
                max_height,
                allow_enlargement,
            },
            thumbnail_prefix,
            storage,
            server_port,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.thumbnail.max_width == 0 || self.thumbnail.max_height == 0 {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_MAX_WIDTH and THUMBNAIL_MAX_HEIGHT must be greater than zero"
            ));
        }

        validate_prefix(&self.thumbnail_prefix)?;

        match self.storage.backend {
            StorageBackend::S3 => {
                if self.storage.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set for the s3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.storage.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set for the local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn naming_policy(&self) -> Result<NamingPolicy, anyhow::Error> {
        NamingPolicy::new(self.thumbnail_prefix.clone())
    }
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got {:?}", key, raw)),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
