//! Query descriptor: the active filter, sort and page choices of one view.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Facet, Product};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sort options for catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Ascending by product id.
    #[default]
    Featured,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    RatingDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Featured,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
    ];

    /// Compare two products under this key.
    ///
    /// Ties compare equal so a stable sort keeps collection order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Featured => a.id.cmp(&b.id),
            SortKey::NameAsc => compare_names(&a.name, &b.name),
            SortKey::NameDesc => compare_names(&b.name, &a.name),
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }

    /// The value used in the sort dropdown and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s.trim())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::NameAsc => "Name: A-Z",
            SortKey::NameDesc => "Name: Z-A",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Highest Rated",
        }
    }
}

/// Collation used for product names.
///
/// Letters compare without regard to accents or case first. Among names
/// equal at that level, unaccented sorts before accented, then lowercase
/// before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    let base = |s: &str| -> Vec<char> {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect()
    };
    let accented = |s: &str| -> Vec<char> { s.nfd().flat_map(char::to_lowercase).collect() };

    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| b.cmp(a))
}

/// An inclusive price window in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    /// Create a range; reversed bounds are swapped.
    pub fn new(min: i64, max: i64) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Check if a price falls within the range (inclusive).
    pub fn contains(&self, price: i64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Clamp both bounds into `span`.
    pub fn clamp_to(&self, span: PriceRange) -> PriceRange {
        PriceRange::new(
            self.min.clamp(span.min, span.max),
            self.max.clamp(span.min, span.max),
        )
    }
}

/// The mutable filter/sort/page state driving a catalog view.
///
/// Mutate it through [`QueryEngine`](crate::search::QueryEngine), which
/// keeps `page` valid; the fields are public for inspection and
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    /// Selected values per facet. An absent or empty set imposes no
    /// restriction.
    pub filters: BTreeMap<Facet, BTreeSet<String>>,
    /// Active price window.
    pub price_range: PriceRange,
    /// Observed price span of the catalog.
    pub full_span: PriceRange,
    pub sort: SortKey,
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl QueryDescriptor {
    /// A descriptor with no restrictions over `full_span`.
    pub fn new(full_span: PriceRange, page_size: u32) -> Self {
        Self {
            filters: BTreeMap::new(),
            price_range: full_span,
            full_span,
            sort: SortKey::Featured,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Selected values for a facet.
    pub fn selected(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        self.filters.get(&facet).filter(|set| !set.is_empty())
    }

    /// Check if a value is selected.
    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        self.filters
            .get(&facet)
            .is_some_and(|set| set.contains(value))
    }

    /// Check a product against every facet selection and the price window.
    pub fn matches(&self, product: &Product) -> bool {
        let facets_match = self
            .filters
            .iter()
            .filter(|(_, selected)| !selected.is_empty())
            .all(|(facet, selected)| selected.contains(facet.value_of(product)));

        facets_match && self.price_range.contains(product.price)
    }

    /// Whether the price window is narrower than the full span.
    pub fn price_is_narrowed(&self) -> bool {
        self.price_range != self.full_span
    }

    /// Number of active restrictions: each selected facet value, plus one
    /// for a narrowed price window.
    pub fn active_filter_count(&self) -> usize {
        let values: usize = self.filters.values().map(BTreeSet::len).sum();
        values + usize::from(self.price_is_narrowed())
    }

    /// Offset of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.page_size as usize
    }
}
