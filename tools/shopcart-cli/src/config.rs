//! CLI configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shopcart_commerce::store::DEFAULT_CART_KEY;
use shopcart_commerce::Currency;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopcart.toml", ".shopcart.toml", "shopcart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where the cart is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog snapshot.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config.currency()?;
        Ok(config)
    }

    /// The configured pricing currency.
    pub fn currency(&self) -> Result<Currency> {
        match Currency::from_code(&self.store.currency) {
            Some(currency) => Ok(currency),
            None => bail!("Unsupported currency in [store]: {}", self.store.currency),
        }
    }
}

/// Cart storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory backing the cache, relative to the config file.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Cache key holding the cart.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_dir() -> String {
    ".shopcart".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// ISO currency code prices are shown in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Product list in the catalog service's JSON shape.
    #[serde(default = "default_catalog_file")]
    pub file: String,
}

fn default_catalog_file() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            file: default_catalog_file(),
        }
    }
}

/// Generate a default shopcart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# ShopCart configuration

[storage]
# Directory holding the saved cart, relative to this file
dir = "{dir}"
key = "{key}"

[store]
currency = "{currency}"

[catalog]
file = "{catalog}"
"#,
        dir = default_storage_dir(),
        key = default_storage_key(),
        currency = default_currency(),
        catalog = default_catalog_file(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_default() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.storage.key, "shoppingCart");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str("[store]\ncurrency = \"EUR\"\n").unwrap();
        assert_eq!(config.currency().unwrap(), Currency::EUR);
        assert_eq!(config.storage.dir, ".shopcart");
        assert_eq!(config.catalog.file, "catalog.json");
    }

    #[test]
    fn test_unknown_currency() {
        let mut config = CliConfig::default();
        config.store.currency = "XYZ".to_string();
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("shopcart.toml");
        std::fs::write(&toml_path, "[storage]\nkey = \"cart\"\n").unwrap();
        let config = CliConfig::load(toml_path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.key, "cart");

        let json_path = dir.path().join("shopcart.json");
        std::fs::write(&json_path, r#"{"catalog":{"file":"products.json"}}"#).unwrap();
        let config = CliConfig::load(json_path.to_str().unwrap()).unwrap();
        assert_eq!(config.catalog.file, "products.json");
        assert_eq!(config.storage.key, "shoppingCart");
    }
}
