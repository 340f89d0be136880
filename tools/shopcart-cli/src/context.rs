//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopcart_cache::Cache;
use shopcart_commerce::catalog::Catalog;
use shopcart_commerce::store::CacheSlot;
use shopcart_commerce::CartStore;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = if let Some(path) = config_path {
            let config = CliConfig::load(path)?;
            let base = Path::new(path)
                .parent()
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (config, base)
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => {
                    output.debug(&format!("Using config {}", path.display()));
                    let config = CliConfig::load(&path.to_string_lossy())?;
                    let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                    (config, base)
                }
                None => (CliConfig::default(), cwd.clone()),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
        })
    }

    /// Directory backing the cart cache.
    pub fn storage_dir(&self) -> PathBuf {
        resolve(&self.base_dir, &self.config.storage.dir)
    }

    /// Open the cart store over the configured cache slot.
    pub fn open_store(&self) -> Result<CartStore<CacheSlot>> {
        let dir = self.storage_dir();
        let cache = Cache::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        let slot = CacheSlot::new(cache, self.config.storage.key.clone());
        let store = CartStore::with_currency(slot, self.config.currency()?);

        tracing::debug!(dir = %dir.display(), lines = store.line_count(), "cart loaded");
        Ok(store)
    }

    /// Read the catalog snapshot, from `file` or the configured path.
    pub fn load_catalog(&self, file: Option<&str>) -> Result<Catalog> {
        let path = match file {
            Some(file) => resolve(&self.cwd, file),
            None => resolve(&self.base_dir, &self.config.catalog.file),
        };
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Catalog::from_json(&json).with_context(|| format!("Bad catalog file: {}", path.display()))
    }
}

/// Find the nearest config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
