//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use shoecart_cache::FileStore;
use shoecart_data::{CatalogApi, FetchPolicy, HttpCatalog, StaticCatalog};
use shoecart_store::CartStore;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::{ConsoleNotifier, Output};

/// The cart store as the CLI wires it.
pub type CliCartStore = CartStore<Arc<dyn CatalogApi>, FileStore, ConsoleNotifier>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Catalog document to serve lookups from, bypassing the API.
    pub catalog_file: Option<String>,
}

/// Configuration plus the file it was read from, if any.
pub struct LoadedConfig {
    pub config: CliConfig,
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Load the given config file, or find one in the directory tree.
    ///
    /// Runs before logging is installed, so it reports nothing itself;
    /// [`Context::new`] logs where the config came from.
    pub fn resolve(config_path: Option<&str>, cwd: &Path) -> Result<Self> {
        if let Some(path) = config_path {
            return Ok(Self {
                config: CliConfig::load(path)?,
                source: Some(PathBuf::from(path)),
            });
        }

        // Try to find config in current directory or parent directories
        Ok(Self::find(cwd).unwrap_or(Self {
            config: CliConfig::default(),
            source: None,
        }))
    }

    /// Find config file in directory tree.
    fn find(start: &Path) -> Option<Self> {
        let config_names = ["shoecart.toml", ".shoecart.toml", "shoecart.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(Self {
                            config,
                            source: Some(config_path),
                        });
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}

impl Context {
    /// Build the context from resolved configuration.
    pub fn new(loaded: LoadedConfig, output: Output, cwd: PathBuf) -> Self {
        match &loaded.source {
            Some(path) => debug!(config = %path.display(), "config loaded"),
            None => debug!(cwd = %cwd.display(), "no config file found, using defaults"),
        }

        Self {
            config: loaded.config,
            output,
            cwd,
            catalog_file: None,
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Build the catalog: the fixture document if one was given, the
    /// product API otherwise.
    pub fn catalog(&self) -> Result<Arc<dyn CatalogApi>> {
        if let Some(file) = &self.catalog_file {
            let path = self.resolve_path(file);
            debug!(catalog = %path.display(), "using catalog document");
            let catalog = StaticCatalog::load(&path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
            return Ok(Arc::new(catalog));
        }

        let api = &self.config.api;
        debug!(api = %api.base_url, timeout_ms = ?api.timeout_ms, "using product API");
        let policy = match api.timeout_ms {
            Some(ms) => FetchPolicy::with_timeout(Duration::from_millis(ms)),
            None => FetchPolicy::default(),
        };
        let catalog = HttpCatalog::new(api.base_url.clone(), policy)
            .with_context(|| format!("Invalid API URL: {}", api.base_url))?;
        Ok(Arc::new(catalog))
    }

    /// Open the cart store backed by the configured snapshot directory.
    pub fn open_store(&self) -> Result<CliCartStore> {
        let dir = self.resolve_path(&self.config.storage.dir);
        debug!(storage = %dir.display(), "opening cart storage");

        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage: {}", dir.display()))?;

        CartStore::open(
            self.catalog()?,
            store,
            ConsoleNotifier::new(self.output.clone()),
            self.config.store_config(),
        )
        .context("Failed to load cart")
    }
}
