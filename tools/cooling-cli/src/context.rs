//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cooling_commerce::search::CatalogView;
use cooling_data::{CatalogSource, FileSource, LoadedCatalog, LocalGateway};
use cooling_store::FileStore;
use serde::de::DeserializeOwned;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["cooling.toml", ".cooling.toml", "cooling.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// The file the config came from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Resolve a path relative to the config file's directory, or the
    /// working directory when no config file was found.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            return path;
        }
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&self.cwd);
        base.join(path)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.data.dir)
    }

    /// Open the storage directory.
    pub fn store(&self) -> Result<FileStore> {
        let dir = self.resolve_path(&self.config.storage.dir);
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))
    }

    pub fn source(&self) -> FileSource {
        let data = &self.config.data;
        FileSource::new(self.data_dir())
            .with_files(&data.products, &data.filters)
            .with_timeout(data.timeout())
            .with_retry(data.retry_policy())
    }

    pub fn gateway(&self) -> Result<LocalGateway<FileStore>> {
        Ok(LocalGateway::new(self.store()?).with_latency(self.config.gateway.latency()))
    }

    /// Apply the configured page size to a view.
    pub fn view(&self, view: CatalogView) -> CatalogView {
        view.with_page_size(self.config.catalog.page_size)
    }

    /// Load the catalog documents, warning about whichever is unavailable.
    pub async fn load_catalog(&self) -> LoadedCatalog {
        let spinner = self.output.spinner("Loading catalog...");
        let loaded = self.source().load_or_empty().await;
        spinner.finish_and_clear();

        if loaded.catalog.is_empty() {
            self.output.warn(&format!(
                "No products available from {}",
                self.data_dir().display()
            ));
        }
        loaded
    }

    /// Load the catalog documents, failing if either is unavailable.
    pub async fn require_catalog(&self) -> Result<LoadedCatalog> {
        let (catalog, filters) = self
            .source()
            .load()
            .await
            .with_context(|| format!("Failed to load catalog from {}", self.data_dir().display()))?;
        Ok(LoadedCatalog {
            catalog,
            filters: Some(filters),
        })
    }

    /// Read a content document from the data directory.
    pub async fn read_document<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.data_dir().join(name);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".cooling.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join(".cooling.toml")));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("cooling.json"), "{}").unwrap();
        std::fs::write(root.path().join("cooling.toml"), "").unwrap();

        assert_eq!(find_config(root.path()), Some(root.path().join("cooling.toml")));
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let root = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(true),
            cwd: PathBuf::from("/somewhere/else"),
            config_path: Some(root.path().join("cooling.toml")),
        };

        assert_eq!(ctx.data_dir(), root.path().join("data"));
        assert_eq!(ctx.resolve_path("/abs"), PathBuf::from("/abs"));
    }
}
