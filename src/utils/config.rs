use std::env;
use std::str::FromStr;

use crate::utils::error::ConfigError;
use crate::utils::helpers::env_or;

/// Which `PostStore` backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                name: "POST_STORE",
                value: value.to_string(),
            }),
        }
    }
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub image_folder: String,
    pub allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            Err(_) => 8000,
        };

        Ok(Self {
            host: env_or("HOST", "localhost"),
            port,
            store_backend: env_or("POST_STORE", "mongo").parse()?,
            mongodb_uri: env_or("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: env_or("MONGODB_DATABASE", "rust_blogdb"),
            image_folder: env_or("IMAGE_FOLDER", "blog-posts"),
            allowed_origin: env_or("ALLOWED_ORIGIN", "http://localhost:5173"),
        })
    }
}
