//! Home page product sections.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{AcType, Catalog, Product};
use crate::search::SortKey;

/// Picks the products shown on the home page.
#[derive(Debug, Clone, Copy)]
pub struct Showcase<'a> {
    products: &'a [Product],
}

impl<'a> Showcase<'a> {
    /// Number of products in the featured section.
    pub const FEATURED_COUNT: usize = 6;
    /// Number of products in each per-type section.
    pub const SECTION_COUNT: usize = 3;

    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            products: catalog.products(),
        }
    }

    /// The `n` highest-rated products; ties keep catalog order.
    pub fn top_rated(&self, n: usize) -> Vec<&'a Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by(|a, b| SortKey::RatingDesc.compare(a, b));
        products.truncate(n);
        products
    }

    /// Products of one type, in catalog order.
    pub fn of_type(&self, ac_type: AcType) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|p| p.ac_type == ac_type)
            .collect()
    }

    /// Up to `n` products of one type chosen at random.
    pub fn random_of_type<R: Rng + ?Sized>(
        &self,
        ac_type: AcType,
        n: usize,
        rng: &mut R,
    ) -> Vec<&'a Product> {
        random_pick(&self.of_type(ac_type), n, rng)
    }
}

/// Choose `n` distinct items at random. When there are no more than `n`
/// items, all of them are returned in their original order.
pub fn random_pick<'a, R: Rng + ?Sized>(
    products: &[&'a Product],
    n: usize,
    rng: &mut R,
) -> Vec<&'a Product> {
    if products.len() <= n {
        return products.to_vec();
    }
    products.choose_multiple(rng, n).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "A", 10).with_rating(4.0).with_type(AcType::Split),
            Product::new(2, "B", 10).with_rating(4.8).with_type(AcType::Window),
            Product::new(3, "C", 10).with_rating(4.0).with_type(AcType::Split),
            Product::new(4, "D", 10).with_rating(3.5).with_type(AcType::Split),
            Product::new(5, "E", 10).with_rating(4.9).with_type(AcType::Split),
        ])
        .unwrap()
    }

    #[test]
    fn test_top_rated() {
        let catalog = catalog();
        let top: Vec<u32> = Showcase::new(&catalog)
            .top_rated(3)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(top, vec![5, 2, 1]);
    }

    #[test]
    fn test_of_type() {
        let catalog = catalog();
        let split = Showcase::new(&catalog).of_type(AcType::Split);
        assert_eq!(split.len(), 4);
        assert!(Showcase::new(&catalog).of_type(AcType::Cassette).is_empty());
    }

    #[test]
    fn test_random_pick_distinct() {
        let catalog = catalog();
        let showcase = Showcase::new(&catalog);
        let mut rng = StdRng::seed_from_u64(7);

        let picked = showcase.random_of_type(AcType::Split, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        let ids: HashSet<u32> = picked.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids.len(), 3);
        assert!(picked.iter().all(|p| p.ac_type == AcType::Split));
    }

    #[test]
    fn test_random_pick_returns_all_when_short() {
        let catalog = catalog();
        let showcase = Showcase::new(&catalog);
        let mut rng = StdRng::seed_from_u64(1);
        let window = showcase.random_of_type(AcType::Window, 3, &mut rng);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id.get(), 2);
    }
}
