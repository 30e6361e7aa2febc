//! Catalog search module.
//!
//! Contains the query descriptor, the query engine that filters, sorts and
//! paginates a catalog, and facet option derivation.

mod engine;
mod facets;
mod query;
mod results;

pub use engine::{CatalogView, QueryEngine, DEFAULT_PAGE_SIZE};
pub use facets::{FacetDeriver, FacetGroup, FacetValue};
pub use query::{PriceRange, QueryDescriptor, SortKey};
pub use results::{results_label, PageLink, Pagination, QueryResults};
