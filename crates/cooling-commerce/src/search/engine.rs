//! The catalog query engine.

use tracing::debug;

use crate::catalog::{AcType, Catalog, Facet, FilterMetadata, Product};
use crate::search::results::total_pages;
use crate::search::{
    FacetDeriver, FacetGroup, Pagination, PriceRange, QueryDescriptor, QueryResults, SortKey,
};

/// Default page size of the catalog pages.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Per-page configuration of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    /// Only products of this type are listed.
    pub type_restriction: Option<AcType>,
    pub page_size: u32,
    /// Facets offered as filters, in display order.
    pub facets: Vec<Facet>,
    /// Facets whose options follow the canonical metadata list.
    pub canonical_facets: Vec<Facet>,
}

impl CatalogView {
    /// The full products page.
    pub fn products() -> Self {
        Self {
            type_restriction: None,
            page_size: DEFAULT_PAGE_SIZE,
            facets: Facet::ALL.to_vec(),
            canonical_facets: Facet::ALL.to_vec(),
        }
    }

    /// A single-type category page such as split ACs.
    pub fn category(ac_type: AcType) -> Self {
        Self {
            type_restriction: Some(ac_type),
            page_size: DEFAULT_PAGE_SIZE,
            facets: vec![
                Facet::Brand,
                Facet::Tonnage,
                Facet::Color,
                Facet::CoverageArea,
            ],
            canonical_facets: vec![Facet::Brand],
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::products()
    }
}

/// Filters, sorts and paginates one product collection.
///
/// Each page session owns one engine. Every descriptor change that can
/// alter the result set resets the page to 1; [`set_page`](Self::set_page)
/// is the only way to move between pages.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    catalog: Catalog,
    descriptor: QueryDescriptor,
    view: CatalogView,
}

impl QueryEngine {
    /// An engine over the whole catalog with the products page settings.
    pub fn new(catalog: Catalog) -> Self {
        Self::for_view(catalog, CatalogView::products())
    }

    /// An engine over the subset of `catalog` a view lists.
    pub fn for_view(catalog: Catalog, view: CatalogView) -> Self {
        let catalog = match view.type_restriction {
            Some(ac_type) => catalog.restrict_to(ac_type),
            None => catalog,
        };
        let descriptor = QueryDescriptor::new(catalog.price_span(), view.page_size);
        Self {
            catalog,
            descriptor,
            view,
        }
    }

    /// The products this engine queries over.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Add or remove one value from a facet selection.
    ///
    /// Returns whether the selection changed. A no-op leaves the page alone.
    pub fn set_facet_filter(&mut self, facet: Facet, value: &str, included: bool) -> bool {
        let changed = if included {
            self.descriptor
                .filters
                .entry(facet)
                .or_default()
                .insert(value.to_string())
        } else {
            let removed = self
                .descriptor
                .filters
                .get_mut(&facet)
                .is_some_and(|set| set.remove(value));
            if self
                .descriptor
                .filters
                .get(&facet)
                .is_some_and(|set| set.is_empty())
            {
                self.descriptor.filters.remove(&facet);
            }
            removed
        };

        if changed {
            debug!(facet = facet.key(), value, included, "facet filter changed");
            self.descriptor.page = 1;
        }
        changed
    }

    /// Set the price window. Reversed bounds are swapped and both are
    /// clamped to the observed price span.
    pub fn set_price_range(&mut self, min: i64, max: i64) {
        let range = PriceRange::new(min, max).clamp_to(self.descriptor.full_span);
        if range != PriceRange::new(min, max) {
            debug!(min, max, ?range, "price range clamped");
        }
        self.descriptor.price_range = range;
        self.descriptor.page = 1;
    }

    /// Change the sort order; always returns to the first page.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.descriptor.sort = sort;
        self.descriptor.page = 1;
    }

    /// Move to a page, clamped to `1..=total_pages`.
    pub fn set_page(&mut self, page: u32) {
        let count = self
            .catalog
            .products()
            .iter()
            .filter(|p| self.descriptor.matches(p))
            .count();
        let last = total_pages(count, self.descriptor.page_size);
        self.descriptor.page = page.clamp(1, last);
    }

    /// Clear every filter, restore the full price span, sort by featured and
    /// return to page 1.
    pub fn reset_all(&mut self) {
        self.descriptor = QueryDescriptor::new(self.catalog.price_span(), self.view.page_size);
    }

    /// Replace the product collection wholesale, keeping the view settings
    /// and starting from a fresh descriptor.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = match self.view.type_restriction {
            Some(ac_type) => catalog.restrict_to(ac_type),
            None => catalog,
        };
        self.reset_all();
    }

    /// Evaluate the descriptor against the catalog.
    ///
    /// Pure: repeated calls without a descriptor change yield identical
    /// results.
    pub fn evaluate(&self) -> QueryResults<'_> {
        let mut items: Vec<&Product> = self
            .catalog
            .products()
            .iter()
            .filter(|p| self.descriptor.matches(p))
            .collect();
        let sort = self.descriptor.sort;
        items.sort_by(|a, b| sort.compare(a, b));

        let pagination = Pagination::new(
            self.descriptor.page,
            self.descriptor.page_size,
            items.len(),
        );
        QueryResults { items, pagination }
    }

    /// Filter options and counts for the view's facets.
    ///
    /// Counts are over the view's whole collection, not the filtered
    /// results.
    pub fn facets(&self, metadata: Option<&FilterMetadata>) -> Vec<FacetGroup> {
        let mut deriver = FacetDeriver::new();
        if let Some(metadata) = metadata {
            for &facet in &self.view.canonical_facets {
                let options = metadata.canonical(facet);
                if !options.is_empty() {
                    deriver = deriver.with_canonical(facet, options.to_vec());
                }
            }
        }
        deriver.derive(
            self.catalog.products(),
            &self.view.facets,
            Some(&self.descriptor),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut products = Vec::new();
        for id in 1..=25u32 {
            let ac_type = match id % 3 {
                0 => AcType::Window,
                1 => AcType::Split,
                _ => AcType::Cassette,
            };
            let brand = if id % 2 == 0 { "LG" } else { "Daikin" };
            products.push(
                Product::new(id, format!("Unit {:02}", id), i64::from(id) * 1000)
                    .with_brand(brand)
                    .with_type(ac_type)
                    .with_rating(f64::from(id % 5)),
            );
        }
        Catalog::new(products).unwrap()
    }

    fn ids(results: &QueryResults<'_>) -> Vec<u32> {
        results.items.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_default_evaluation() {
        let engine = QueryEngine::new(catalog());
        let results = engine.evaluate();
        assert_eq!(results.total_count(), 25);
        assert_eq!(results.total_pages(), 3);
        assert_eq!(results.page_items().len(), 10);
        assert_eq!(ids(&results)[..3], [1, 2, 3]);
    }

    #[test]
    fn test_facet_filter_and_or_semantics() {
        let mut engine = QueryEngine::new(catalog());
        assert!(engine.set_facet_filter(Facet::Brand, "LG", true));
        assert!(engine.set_facet_filter(Facet::Type, "window", true));
        assert!(engine.set_facet_filter(Facet::Type, "split", true));

        let results = engine.evaluate();
        assert!(results.items.iter().all(|p| p.brand == "LG"));
        assert!(results
            .items
            .iter()
            .all(|p| p.ac_type == AcType::Window || p.ac_type == AcType::Split));
        assert_eq!(ids(&results), vec![4, 6, 10, 12, 16, 18, 22, 24]);
    }

    #[test]
    fn test_noop_filter_keeps_page() {
        let mut engine = QueryEngine::new(catalog());
        engine.set_facet_filter(Facet::Brand, "LG", true);
        engine.set_page(2);
        assert_eq!(engine.descriptor().page, 2);

        assert!(!engine.set_facet_filter(Facet::Brand, "LG", true));
        assert!(!engine.set_facet_filter(Facet::Brand, "Gree", false));
        assert_eq!(engine.descriptor().page, 2);

        assert!(engine.set_facet_filter(Facet::Brand, "LG", false));
        assert_eq!(engine.descriptor().page, 1);
        assert!(engine.descriptor().filters.is_empty());
    }

    #[test]
    fn test_price_range_swapped_and_clamped() {
        let mut engine = QueryEngine::new(catalog());
        engine.set_price_range(1_000_000, 20_000);
        assert_eq!(engine.descriptor().price_range, PriceRange::new(20_000, 25_000));
        assert_eq!(engine.evaluate().total_count(), 6);

        engine.set_price_range(-5, 2_000);
        assert_eq!(engine.descriptor().price_range, PriceRange::new(1_000, 2_000));
    }

    #[test]
    fn test_set_page_clamps() {
        let mut engine = QueryEngine::new(catalog());
        engine.set_page(0);
        assert_eq!(engine.descriptor().page, 1);
        engine.set_page(99);
        assert_eq!(engine.descriptor().page, 3);
        assert_eq!(engine.evaluate().page_items().len(), 5);
    }

    #[test]
    fn test_sort_resets_page() {
        let mut engine = QueryEngine::new(catalog());
        engine.set_page(3);
        engine.set_sort(SortKey::PriceDesc);
        assert_eq!(engine.descriptor().page, 1);
        assert_eq!(ids(&engine.evaluate())[0], 25);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        let mut engine = QueryEngine::new(catalog());
        engine.set_sort(SortKey::RatingDesc);
        let results = engine.evaluate();
        // Ratings are id % 5, so the four-star group is ids 4, 9, 14, 19, 24 in order.
        assert_eq!(ids(&results)[..5], [4, 9, 14, 19, 24]);
        assert_eq!(ids(&results), ids(&engine.evaluate()));
    }

    #[test]
    fn test_reset_all_idempotent() {
        let mut engine = QueryEngine::new(catalog());
        engine.set_facet_filter(Facet::Brand, "LG", true);
        engine.set_sort(SortKey::NameDesc);
        engine.set_price_range(5_000, 9_000);

        engine.reset_all();
        let once = engine.descriptor().clone();
        engine.reset_all();
        assert_eq!(engine.descriptor(), &once);
        assert_eq!(once.sort, SortKey::Featured);
        assert_eq!(once.price_range, PriceRange::new(1_000, 25_000));
    }

    #[test]
    fn test_category_view_restricts_type() {
        let engine = QueryEngine::for_view(catalog(), CatalogView::category(AcType::Split));
        let results = engine.evaluate();
        assert!(results.items.iter().all(|p| p.ac_type == AcType::Split));
        assert_eq!(results.total_count(), 9);
        assert!(!engine.view().facets.contains(&Facet::Type));
    }

    #[test]
    fn test_empty_catalog() {
        let mut engine = QueryEngine::new(Catalog::empty());
        engine.set_page(4);
        engine.set_price_range(10, 20);
        let results = engine.evaluate();
        assert_eq!(results.total_count(), 0);
        assert_eq!(results.total_pages(), 1);
        assert!(results.page_items().is_empty());
    }

    #[test]
    fn test_facets_use_canonical_brands_on_category_page() {
        let metadata = FilterMetadata {
            brands: vec!["Haier".to_string(), "LG".to_string(), "Daikin".to_string()],
            tonnage: vec!["9 Ton".to_string()],
            ..FilterMetadata::default()
        };
        let mut engine = QueryEngine::for_view(catalog(), CatalogView::category(AcType::Window));
        engine.set_facet_filter(Facet::Brand, "LG", true);

        let groups = engine.facets(Some(&metadata));
        assert_eq!(groups.len(), 4);
        let brands: Vec<&str> = groups[0].values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(brands, vec!["LG", "Daikin"]);
        assert!(groups[0].get("LG").unwrap().selected);
        assert_eq!(groups[0].get("LG").unwrap().count, 4);
        // Tonnage is not canonical on category pages: the empty tonnage of
        // every product shows up as one first-seen value.
        assert_eq!(groups[1].values.len(), 1);
    }

    #[test]
    fn test_replace_catalog_resets_descriptor() {
        let mut engine = QueryEngine::new(catalog());
        engine.set_facet_filter(Facet::Brand, "LG", true);
        engine.replace_catalog(Catalog::empty());
        assert!(engine.descriptor().filters.is_empty());
        assert_eq!(engine.evaluate().total_count(), 0);
    }
}
