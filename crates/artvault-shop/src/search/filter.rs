//! The filter/sort engine.

use crate::catalog::{Catalog, Product};
use crate::search::{FilterCriteria, SortMode};

/// Project the catalog through the criteria.
///
/// Keeps products admitted by the category and text filters, then orders
/// them. Price sorts are stable: equal prices keep catalog order in both
/// directions. Pure; an empty result is a valid answer.
pub fn project<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Product> {
    let mut visible: Vec<&Product> = catalog.iter().filter(|p| criteria.admits(p)).collect();

    match criteria.sort {
        SortMode::Default => {}
        SortMode::PriceAsc => visible.sort_by(|a, b| a.price.amount_minor.cmp(&b.price.amount_minor)),
        SortMode::PriceDesc => visible.sort_by(|a, b| b.price.amount_minor.cmp(&a.price.amount_minor)),
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::search::CategoryFilter;

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_all_default_keeps_catalog_order() {
        let catalog = Catalog::sample();
        let result = project(&catalog, &FilterCriteria::all());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_anime_price_asc() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::all()
            .with_category(CategoryFilter::Only(Category::Anime))
            .with_sort(SortMode::PriceAsc);
        let result = project(&catalog, &criteria);
        assert_eq!(ids(&result), vec![5, 4]);
        assert_eq!(result[0].price.amount_minor, 1000);
        assert_eq!(result[1].price.amount_minor, 1600);
    }

    #[test]
    fn test_price_sort_is_stable_both_ways() {
        // Products 2 and 5 share a price of 1000; 2 comes first in the catalog.
        let catalog = Catalog::sample();
        let asc = project(&catalog, &FilterCriteria::all().with_sort(SortMode::PriceAsc));
        assert_eq!(ids(&asc), vec![3, 2, 5, 1, 4, 6]);

        let desc = project(&catalog, &FilterCriteria::all().with_sort(SortMode::PriceDesc));
        assert_eq!(ids(&desc), vec![6, 4, 1, 2, 5, 3]);
    }

    #[test]
    fn test_search_matches_title_or_category_case_insensitively() {
        let catalog = Catalog::sample();
        let by_title = project(&catalog, &FilterCriteria::all().with_search("MOON"));
        assert_eq!(ids(&by_title), vec![4]);

        let by_category = project(&catalog, &FilterCriteria::all().with_search("histor"));
        assert_eq!(ids(&by_category), vec![1, 6]);
    }

    #[test]
    fn test_custom_category_filter_is_exact() {
        use crate::catalog::{CatalogManifest, ProductRecord};
        use crate::ids::ProductId;
        use crate::money::Currency;

        let record = |id: u64, category: &str| ProductRecord {
            id: ProductId::new(id),
            title: format!("Piece {}", id),
            category: Category::parse(category),
            price: 500,
            old_price: None,
            image: String::new(),
        };
        let manifest = CatalogManifest {
            products: vec![record(1, "Sculpture"), record(2, "sculpture")],
        };
        let catalog = Catalog::from_manifest(&manifest, Currency::USD).unwrap();

        let upper = project(&catalog, &FilterCriteria::from_controls("Sculpture", "default", ""));
        assert_eq!(ids(&upper), vec![1]);
        let lower = project(&catalog, &FilterCriteria::from_controls("sculpture", "default", ""));
        assert_eq!(ids(&lower), vec![2]);
    }

    #[test]
    fn test_search_and_category_combine() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::from_controls("digital", "default", "window");
        assert_eq!(ids(&project(&catalog, &criteria)), vec![3]);
    }

    #[test]
    fn test_empty_result() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::all().with_search("no such piece");
        assert!(project(&catalog, &criteria).is_empty());

        let unknown = FilterCriteria::from_controls("sculpture", "default", "");
        assert!(project(&catalog, &unknown).is_empty());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::from_controls("all", "priceDesc", "a");
        let first = ids(&project(&catalog, &criteria));
        let second = ids(&project(&catalog, &criteria));
        assert_eq!(first, second);
    }
}
