//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cooling_commerce::content::GALLERY_PAGE_SIZE;
use cooling_commerce::search::DEFAULT_PAGE_SIZE;
use cooling_data::{BackoffStrategy, RetryPolicy, FILTERS_FILE, PRODUCTS_FILE};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Catalog document location.
    #[serde(default)]
    pub data: DataConfig,

    /// Where the cart and engagement records are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Listing options.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Submission gateway options.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Catalog document configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Directory holding the documents.
    #[serde(default = "default_data_dir")]
    pub dir: String,

    #[serde(default = "default_products")]
    pub products: String,

    #[serde(default = "default_filters")]
    pub filters: String,

    #[serde(default = "default_faq")]
    pub faq: String,

    #[serde(default = "default_gallery")]
    pub gallery: String,

    /// Per-attempt read deadline.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after a failed read.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_products() -> String {
    PRODUCTS_FILE.to_string()
}

fn default_filters() -> String {
    FILTERS_FILE.to_string()
}

fn default_faq() -> String {
    "faq.json".to_string()
}

fn default_gallery() -> String {
    "gallery.json".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_retries() -> u32 {
    1
}

impl DataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        if self.retries == 0 {
            return RetryPolicy::none();
        }
        RetryPolicy::new(self.retries).with_backoff(BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: self.timeout(),
        })
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            products: default_products(),
            filters: default_filters(),
            faq: default_faq(),
            gallery: default_gallery(),
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    ".cooling/storage".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_gallery_page_size")]
    pub gallery_page_size: usize,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_gallery_page_size() -> usize {
    GALLERY_PAGE_SIZE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            gallery_page_size: default_gallery_page_size(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    /// Simulated round trip for each submission.
    #[serde(default)]
    pub latency_ms: u64,
}

impl GatewayConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Generate a default cooling.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Raheem Cooling storefront configuration

[data]
# Directory with the product and filter documents
dir = "data"
products = "{products}"
filters = "{filters}"
faq = "faq.json"
gallery = "gallery.json"
# Deadline for each read attempt, and retries after a failure
timeout_ms = 2000
retries = 1

[storage]
# Cart, ratings, newsletter, contact and visitor records
dir = ".cooling/storage"

[catalog]
page_size = {page_size}
gallery_page_size = {gallery_page_size}

[gateway]
# Simulated delay for contact and newsletter submissions
latency_ms = 0
"#,
        products = PRODUCTS_FILE,
        filters = FILTERS_FILE,
        page_size = DEFAULT_PAGE_SIZE,
        gallery_page_size = GALLERY_PAGE_SIZE,
    )
}
