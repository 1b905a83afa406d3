//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CommunityConfig, ConfigError, DatabaseConfig, Environment,
};
