use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Where the two published sheets come from. Each has a primary and a
/// fallback source; `demo_mode` skips the primary entirely and reads the
/// bundled fallback data.
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub meals: String,
    pub inventory: String,
    pub fallback_meals: String,
    pub fallback_inventory: String,
    #[serde(default)]
    pub demo_mode: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the saved plan and the catalog cache.
    pub state_dir: String,
    /// How long a cached catalog snapshot stays usable.
    pub cache_ttl_secs: u64,
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
    /// 1. Environment variables (MEALPALETTE__STORAGE__STATE_DIR, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Set defaults
        builder = builder
            .set_default("data.meals", "data/meals.csv")?
            .set_default("data.inventory", "data/inventory.csv")?
            .set_default("data.fallback_meals", "data/meals.csv")?
            .set_default("data.fallback_inventory", "data/inventory.csv")?
            .set_default("storage.state_dir", ".mealpalette")?
            .set_default("storage.cache_ttl_secs", 3600)?;

        // Load config file if path provided or CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Try to load config file (optional - ignore if not found)
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // Override with environment variables (MEALPALETTE__DATA__MEALS, etc.)
        builder = builder.add_source(
            Environment::with_prefix("MEALPALETTE")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data.meals.is_empty() || self.data.inventory.is_empty() {
            return Err("Data source paths must not be empty".to_string());
        }
        if self.data.fallback_meals.is_empty() || self.data.fallback_inventory.is_empty() {
            return Err("Fallback data source paths must not be empty".to_string());
        }
        if self.storage.state_dir.is_empty() {
            return Err("Storage state_dir must not be empty".to_string());
        }
        if self.storage.cache_ttl_secs == 0 {
            return Err("Storage cache_ttl_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            data: DataConfig {
                meals: "data/meals.csv".to_string(),
                inventory: "data/inventory.csv".to_string(),
                fallback_meals: "data/meals.csv".to_string(),
                fallback_inventory: "data/inventory.csv".to_string(),
                demo_mode: false,
            },
            storage: StorageConfig {
                state_dir: ".mealpalette".to_string(),
                cache_ttl_secs: 3600,
            },
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_state_dir() {
        let mut config = base_config();
        config.storage.state_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_ttl() {
        let mut config = base_config();
        config.storage.cache_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_data_path() {
        let mut config = base_config();
        config.data.inventory = String::new();
        assert!(config.validate().is_err());
    }
}
