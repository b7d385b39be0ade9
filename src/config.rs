use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub member: MemberConfig,
    #[serde(default)]
    pub recipes: RecipeConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory widget documents are stored under.
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemberConfig {
    /// Member whose plan the CLI operates on by default.
    pub id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeConfig {
    #[serde(default = "default_catalog")]
    pub catalog: String,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }
}

fn default_catalog() -> String {
    "recipes.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALWEEK__DATA__DIR, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("data.dir", "data")?
            .set_default("member.id", "household")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALWEEK")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.data.dir.trim().is_empty() {
            return Err("data.dir must not be empty".to_string());
        }
        if self.member.id.trim().is_empty() {
            return Err("member.id must not be empty".to_string());
        }
        Ok(())
    }
}
