//! Configuration types for seed data generation.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

use crate::generators::MembershipGenConfig;

/// Errors raised while assembling a [`SeedConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Invalid members-per-chat range {min}..={max}")]
    InvalidMemberRange { min: usize, max: usize },
    #[error("Invalid database URL: {0}")]
    DatabaseUrl(#[from] sqlx::Error),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Connection settings for the target PostgreSQL database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Full connection URL. Takes precedence over the individual fields.
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "messenger".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            url: None,
        }
    }
}

impl DatabaseConfig {
    /// Returns connection options for sqlx.
    ///
    /// Fields are passed through verbatim, so credentials may contain any
    /// character. A configured `url` is parsed instead.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return Ok(url.parse()?);
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable))
    }
}

/// Configuration for a seeding run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of users to generate.
    pub user_count: usize,

    /// Number of chats to generate.
    pub chat_count: usize,

    /// Number of messages to generate.
    pub message_count: usize,

    /// Smallest number of members drawn for a chat (before capping by user count).
    pub min_members_per_chat: usize,

    /// Largest number of members drawn for a chat (before capping by user count).
    pub max_members_per_chat: usize,

    /// Fixed RNG seed for reproducible data. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,

    /// Seed into memory instead of the database.
    pub dry_run: bool,

    /// Create the tables if they do not exist yet.
    pub create_schema: bool,

    /// Log progress every N rows within a stage.
    pub progress_interval: usize,

    pub database: DatabaseConfig,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            user_count: 100,
            chat_count: 20,
            message_count: 500,
            min_members_per_chat: 2,
            max_members_per_chat: 10,
            rng_seed: None,
            dry_run: false,
            create_schema: false,
            progress_interval: 1000,
            database: DatabaseConfig::default(),
        }
    }
}

impl SeedConfig {
    /// Loads configuration from defaults, an optional JSON file named by
    /// `SEED_CONFIG`, and environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("SEED_CONFIG") {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `SEED_*`, `DB_*` and `DATABASE_URL` overrides from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SEED_USERS") {
            self.user_count = parse_value("SEED_USERS", &v)?;
        }
        if let Some(v) = lookup("SEED_CHATS") {
            self.chat_count = parse_value("SEED_CHATS", &v)?;
        }
        if let Some(v) = lookup("SEED_MESSAGES") {
            self.message_count = parse_value("SEED_MESSAGES", &v)?;
        }
        if let Some(v) = lookup("SEED_RNG_SEED") {
            self.rng_seed = Some(parse_value("SEED_RNG_SEED", &v)?);
        }
        if let Some(v) = lookup("SEED_DRY_RUN") {
            self.dry_run = parse_flag("SEED_DRY_RUN", &v)?;
        }
        if let Some(v) = lookup("SEED_CREATE_SCHEMA") {
            self.create_schema = parse_flag("SEED_CREATE_SCHEMA", &v)?;
        }
        if let Some(v) = lookup("DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.database.port = parse_value("DB_PORT", &v)?;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("DB_USER") {
            self.database.user = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = Some(v);
        }

        self.validate()?;
        Ok(self)
    }

    /// Returns the inclusive range of members drawn per chat.
    pub fn members_per_chat(&self) -> RangeInclusive<usize> {
        self.min_members_per_chat..=self.max_members_per_chat
    }

    /// Returns the validated membership settings.
    pub fn membership_config(&self) -> Result<MembershipGenConfig, ConfigError> {
        MembershipGenConfig::new(self.members_per_chat())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.membership_config()?;
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}
