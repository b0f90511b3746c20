use anyhow::Context;
use config::{Config, Environment};
use serde::Deserialize;

use crate::library_repository::PostgresLibraryRepositoryConfig;

/// Service configuration read from environment variables
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceSettings {
    pub use_in_memory_db: bool,
    pub db_host: String,
    pub db_username: String,
    pub db_password: String,
    pub bind_address: String,
    pub port: u16,
    /// Secret used to encrypt session cookies, at least 64 bytes.
    /// A random key is generated when unset
    pub session_key: Option<String>,
    pub cookie_secure: bool,
}

impl ServiceSettings {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Environment::default())
    }

    pub fn load_from(environment: Environment) -> anyhow::Result<Self> {
        Config::builder()
            .set_default("use_in_memory_db", false)?
            .set_default("db_host", "127.0.0.1")?
            .set_default("db_username", "postgres")?
            .set_default("db_password", "postgres")?
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("cookie_secure", false)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn postgres_config(&self) -> PostgresLibraryRepositoryConfig {
        PostgresLibraryRepositoryConfig {
            hostname: self.db_host.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
        }
    }
}
