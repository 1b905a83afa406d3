//! Application configuration structs
//!
//! Loads configuration from environment variables and config files.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub community: CommunityConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Worker ID for the Snowflake generator
    #[serde(default)]
    pub worker_id: u16,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Community rule configuration
///
/// The tunable surface of the membership and lifecycle rules: name length
/// bounds, the per-user community quota, and the soft-delete retention
/// window.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityConfig {
    #[serde(default = "default_name_min_length")]
    pub name_min_length: usize,
    #[serde(default = "default_name_max_length")]
    pub name_max_length: usize,
    #[serde(default = "default_max_per_user")]
    pub max_communities_per_user: u32,
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            name_min_length: default_name_min_length(),
            name_max_length: default_name_max_length(),
            max_communities_per_user: default_max_per_user(),
            retention_days: default_retention_days(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "community-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_name_min_length() -> usize {
    3
}

fn default_name_max_length() -> usize {
    100
}

fn default_max_per_user() -> u32 {
    10
}

fn default_retention_days() -> i64 {
    30
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
                worker_id: env::var("WORKER_ID")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            community: CommunityConfig {
                name_min_length: env::var("COMMUNITY_NAME_MIN_LENGTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_name_min_length),
                name_max_length: env::var("COMMUNITY_NAME_MAX_LENGTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_name_max_length),
                max_communities_per_user: env::var("COMMUNITY_MAX_PER_USER")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_per_user),
                retention_days: env::var("COMMUNITY_RETENTION_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_retention_days),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
