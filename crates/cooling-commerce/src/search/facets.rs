//! Facet option derivation for filter controls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Facet, Product};
use crate::search::QueryDescriptor;

/// A single facet value with its product count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of products with this value.
    pub count: usize,
    /// Whether this value is currently selected.
    pub selected: bool,
}

/// The options for one filter group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetGroup {
    pub facet: Facet,
    pub values: Vec<FacetValue>,
}

impl FacetGroup {
    /// Look up a value's entry.
    pub fn get(&self, value: &str) -> Option<&FacetValue> {
        self.values.iter().find(|v| v.value == value)
    }

    /// Sidebar heading.
    pub fn label(&self) -> &'static str {
        self.facet.label()
    }
}

/// Computes the distinct values of each facet in a product collection.
///
/// A facet with a canonical option list keeps the canonical order and drops
/// values no product carries. Any other facet lists values in first-seen
/// order.
#[derive(Debug, Clone, Default)]
pub struct FacetDeriver {
    canonical: HashMap<Facet, Vec<String>>,
}

impl FacetDeriver {
    /// A deriver that uses first-seen order for every facet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply a canonical option list for one facet.
    pub fn with_canonical(mut self, facet: Facet, options: Vec<String>) -> Self {
        self.canonical.insert(facet, options);
        self
    }

    /// Derive options and counts for each requested facet.
    ///
    /// Values selected in `descriptor` are flagged.
    pub fn derive(
        &self,
        products: &[Product],
        facets: &[Facet],
        descriptor: Option<&QueryDescriptor>,
    ) -> Vec<FacetGroup> {
        facets
            .iter()
            .map(|&facet| self.derive_one(products, facet, descriptor))
            .collect()
    }

    fn derive_one(
        &self,
        products: &[Product],
        facet: Facet,
        descriptor: Option<&QueryDescriptor>,
    ) -> FacetGroup {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for product in products {
            let value = facet.value_of(product);
            let count = counts.entry(value).or_insert(0);
            if *count == 0 {
                order.push(value);
            }
            *count += 1;
        }

        let selected = |value: &str| descriptor.is_some_and(|d| d.is_selected(facet, value));
        let entry = |value: &str, count: usize| FacetValue {
            value: value.to_string(),
            count,
            selected: selected(value),
        };

        let values = match self.canonical.get(&facet) {
            Some(options) => options
                .iter()
                .filter_map(|option| {
                    counts
                        .get(option.as_str())
                        .map(|&count| entry(option, count))
                })
                .collect(),
            None => order
                .into_iter()
                .map(|value| entry(value, counts[value]))
                .collect(),
        };

        FacetGroup { facet, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::PriceRange;

    fn products() -> Vec<Product> {
        vec![
            Product::new(1, "A", 100).with_brand("LG").with_tonnage("1.5 Ton"),
            Product::new(2, "B", 200).with_brand("Gree").with_tonnage("1 Ton"),
            Product::new(3, "C", 300).with_brand("LG").with_tonnage("1.5 Ton"),
            Product::new(4, "D", 400).with_brand("Haier").with_tonnage("2 Ton"),
        ]
    }

    #[test]
    fn test_first_seen_order_with_counts() {
        let groups = FacetDeriver::new().derive(&products(), &[Facet::Brand], None);
        let brands = &groups[0];
        let listed: Vec<(&str, usize)> = brands
            .values
            .iter()
            .map(|v| (v.value.as_str(), v.count))
            .collect();
        assert_eq!(listed, vec![("LG", 2), ("Gree", 1), ("Haier", 1)]);
    }

    #[test]
    fn test_canonical_order_drops_absent_values() {
        let canonical = vec![
            "Daikin".to_string(),
            "Haier".to_string(),
            "Gree".to_string(),
            "LG".to_string(),
        ];
        let deriver = FacetDeriver::new().with_canonical(Facet::Brand, canonical);
        let groups = deriver.derive(&products(), &[Facet::Brand, Facet::Tonnage], None);

        let brands: Vec<&str> = groups[0].values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(brands, vec!["Haier", "Gree", "LG"]);
        assert!(groups[0].get("Daikin").is_none());

        let tonnage: Vec<&str> = groups[1].values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(tonnage, vec!["1.5 Ton", "1 Ton", "2 Ton"]);
    }

    #[test]
    fn test_selected_values_flagged() {
        let mut descriptor = QueryDescriptor::new(PriceRange::new(100, 400), 10);
        descriptor
            .filters
            .entry(Facet::Brand)
            .or_default()
            .insert("Gree".to_string());

        let groups = FacetDeriver::new().derive(&products(), &[Facet::Brand], Some(&descriptor));
        assert!(groups[0].get("Gree").unwrap().selected);
        assert!(!groups[0].get("LG").unwrap().selected);
    }

    #[test]
    fn test_empty_products() {
        let groups = FacetDeriver::new().derive(&[], &Facet::ALL, None);
        assert_eq!(groups.len(), 5);
        assert!(groups.iter().all(|g| g.values.is_empty()));
    }
}
