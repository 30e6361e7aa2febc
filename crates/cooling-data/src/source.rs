//! Catalog document sources.
//!
//! The storefront loads two static documents once per session: the product
//! list and the filter metadata. Both are read whole; there is no partial or
//! paged fetch. A source that fails leaves the caller to decide on a
//! fallback, and [`CatalogSource::load_or_empty`] applies the usual one:
//! an empty catalog, and facets derived from the products alone.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use cooling_commerce::catalog::{Catalog, FilterMetadata, Product};
use tracing::{debug, warn};

use crate::error::{DataError, DataResult};
use crate::retry::RetryPolicy;

/// Default product document name.
pub const PRODUCTS_FILE: &str = "products.json";
/// Default filter metadata document name.
pub const FILTERS_FILE: &str = "filters.json";

/// Everything a catalog page needs at load time.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    /// `None` when the metadata document was unavailable.
    pub filters: Option<FilterMetadata>,
}

/// Where product and filter documents come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load and validate the product collection.
    async fn load_products(&self) -> DataResult<Catalog>;

    /// Load the canonical facet option lists.
    async fn load_filters(&self) -> DataResult<FilterMetadata>;

    /// Load both documents concurrently, failing if either fails.
    async fn load(&self) -> DataResult<(Catalog, FilterMetadata)> {
        futures::try_join!(self.load_products(), self.load_filters())
    }

    /// Load both documents concurrently, substituting fallbacks for
    /// whichever is unavailable.
    async fn load_or_empty(&self) -> LoadedCatalog {
        let (products, filters) = futures::join!(self.load_products(), self.load_filters());

        let catalog = products.unwrap_or_else(|e| {
            warn!(error = %e, "product data unavailable, using empty catalog");
            Catalog::empty()
        });
        let filters = filters
            .map_err(|e| warn!(error = %e, "filter metadata unavailable"))
            .ok();

        LoadedCatalog { catalog, filters }
    }
}

fn parse_products(json: &str) -> DataResult<Catalog> {
    let products: Vec<Product> = serde_json::from_str(json).map_err(|e| DataError::Parse {
        document: "products",
        message: e.to_string(),
    })?;
    Ok(Catalog::new(products)?)
}

fn parse_filters(json: &str) -> DataResult<FilterMetadata> {
    serde_json::from_str(json).map_err(|e| DataError::Parse {
        document: "filters",
        message: e.to_string(),
    })
}

/// Reads the documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
    products_file: String,
    filters_file: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl FileSource {
    /// A source over `dir` with the default file names, a 2 second
    /// per-attempt timeout and one retry.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            products_file: PRODUCTS_FILE.to_string(),
            filters_file: FILTERS_FILE.to_string(),
            timeout: Duration::from_secs(2),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_files(mut self, products: impl Into<String>, filters: impl Into<String>) -> Self {
        self.products_file = products.into();
        self.filters_file = filters.into();
        self
    }

    /// Deadline for each read attempt.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_document(&self, name: &str) -> DataResult<String> {
        let path = self.dir.join(name);
        let timeout = self.timeout;

        self.retry
            .run(name, || {
                let path = path.clone();
                async move {
                    match tokio::time::timeout(timeout, tokio::fs::read_to_string(&path)).await {
                        Ok(Ok(text)) => {
                            debug!(path = %path.display(), bytes = text.len(), "document read");
                            Ok(text)
                        }
                        Ok(Err(source)) => Err(DataError::Io { path, source }),
                        Err(_) => Err(DataError::Timeout(timeout)),
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn load_products(&self) -> DataResult<Catalog> {
        let json = self.read_document(&self.products_file).await?;
        parse_products(&json)
    }

    async fn load_filters(&self) -> DataResult<FilterMetadata> {
        let json = self.read_document(&self.filters_file).await?;
        parse_filters(&json)
    }
}

/// Serves documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: String,
    filters: Option<String>,
}

impl StaticSource {
    pub fn new(products: impl Into<String>) -> Self {
        Self {
            products: products.into(),
            filters: None,
        }
    }

    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn load_products(&self) -> DataResult<Catalog> {
        parse_products(&self.products)
    }

    async fn load_filters(&self) -> DataResult<FilterMetadata> {
        match &self.filters {
            Some(json) => parse_filters(json),
            None => Ok(FilterMetadata::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cooling_commerce::catalog::Facet;
    use cooling_commerce::CommerceError;

    const PRODUCTS: &str = r#"[
        {"id": 1, "name": "Daikin Inverter", "brand": "Daikin", "type": "split", "tonnage": "1.5 Ton",
         "coverageArea": "150-200 sq ft", "color": "White", "price": 145000, "rating": 4.7},
        {"id": 2, "name": "Haier Window", "brand": "Haier", "type": "window", "tonnage": "1 Ton",
         "coverageArea": "100-150 sq ft", "color": "Grey", "price": 76000, "rating": 3.9}
    ]"#;
    const FILTERS: &str = r#"{"brands": ["Haier", "Daikin"], "tonnage": ["1 Ton", "1.5 Ton"]}"#;

    fn write_docs(dir: &Path) {
        std::fs::write(dir.join(PRODUCTS_FILE), PRODUCTS).unwrap();
        std::fs::write(dir.join(FILTERS_FILE), FILTERS).unwrap();
    }

    #[tokio::test]
    async fn test_file_source_loads_both() {
        let dir = tempfile::tempdir().unwrap();
        write_docs(dir.path());

        let (catalog, filters) = FileSource::new(dir.path()).load().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(filters.canonical(Facet::Brand), ["Haier", "Daikin"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path()).with_retry(RetryPolicy::new(5));

        let err = source.load_products().await.unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_malformed_products() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("items.json"), "{ not json").unwrap();
        let source = FileSource::new(dir.path()).with_files("items.json", FILTERS_FILE);

        assert!(matches!(
            source.load_products().await,
            Err(DataError::Parse { document: "products", .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_product_rejected() {
        let source = StaticSource::new(
            r#"[{"id": 1, "name": "Bad", "brand": "LG", "type": "split", "tonnage": "1 Ton",
                 "coverageArea": "", "color": "", "price": 100, "rating": 7.5}]"#,
        );
        assert!(matches!(
            source.load_products().await,
            Err(DataError::Commerce(CommerceError::InvalidProduct { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_or_empty_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PRODUCTS_FILE), PRODUCTS).unwrap();

        let loaded = FileSource::new(dir.path())
            .with_retry(RetryPolicy::none())
            .load_or_empty()
            .await;
        assert_eq!(loaded.catalog.len(), 2);
        assert!(loaded.filters.is_none());

        let loaded = StaticSource::new("oops").load_or_empty().await;
        assert!(loaded.catalog.is_empty());
        assert!(loaded.filters.is_some());
    }
}
