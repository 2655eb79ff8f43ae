//! Products and the catalog store.

use std::collections::HashMap;

use serde::Serialize;

use crate::cart::MAX_QUANTITY_PER_ENTRY;
use crate::catalog::{CatalogManifest, Category};
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Stable identifier, unique within the catalog.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Category used by the category filter and text search.
    pub category: Category,
    /// Unit price.
    pub price: Money,
    /// Compare-at price shown struck through.
    pub old_price: Option<Money>,
    /// Image reference (path or URL).
    pub image: String,
}

impl Product {
    /// Check if this product is on sale (old price above current price).
    pub fn is_on_sale(&self) -> bool {
        self.old_price
            .map(|old| old.amount_minor > self.price.amount_minor)
            .unwrap_or(false)
    }

    /// Case-insensitive substring match against title or category.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.category.as_str().to_lowercase().contains(needle)
    }
}

/// The read-only catalog store.
///
/// Products keep manifest order; lookups by id go through an index.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    currency: Currency,
}

impl Catalog {
    /// Build a catalog from a manifest, validating every record.
    ///
    /// Returns an error if ids repeat, a title is blank or a price is not
    /// positive. Prices are also bounded so that a cart holding every
    /// product at the maximum quantity still totals without overflow.
    pub fn from_manifest(manifest: &CatalogManifest, currency: Currency) -> Result<Self, ShopError> {
        let mut products = Vec::with_capacity(manifest.products.len());
        let mut index = HashMap::with_capacity(manifest.products.len());
        let mut price_budget = i64::MAX / i64::from(MAX_QUANTITY_PER_ENTRY);

        for record in &manifest.products {
            if record.title.trim().is_empty() {
                return Err(ShopError::EmptyTitle(record.id));
            }
            if record.price <= 0 || record.price > price_budget {
                return Err(ShopError::InvalidPrice {
                    product_id: record.id,
                    price: record.price,
                });
            }
            price_budget -= record.price;
            if index.insert(record.id, products.len()).is_some() {
                return Err(ShopError::DuplicateProduct(record.id));
            }

            products.push(Product {
                id: record.id,
                title: record.title.trim().to_string(),
                category: record.category.clone(),
                price: Money::new(record.price, currency),
                old_price: record.old_price.map(|p| Money::new(p, currency)),
                image: record.image.clone(),
            });
        }

        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// The built-in six-piece sample catalog.
    pub fn sample() -> Self {
        Self::from_manifest(&CatalogManifest::sample(), Currency::default())
            .unwrap_or_else(|_| Self::empty(Currency::default()))
    }

    /// An empty catalog.
    pub fn empty(currency: Currency) -> Self {
        Self {
            products: Vec::new(),
            index: HashMap::new(),
            currency,
        }
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    /// Check whether an id resolves.
    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// Products in manifest order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every price in this catalog is expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen: Vec<&Category> = Vec::new();
        for product in &self.products {
            if !seen.contains(&&product.category) {
                seen.push(&product.category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRecord;

    fn record(id: u64, price: i64) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            title: format!("Piece {}", id),
            category: Category::Digital,
            price,
            old_price: None,
            image: String::new(),
        }
    }

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 6);
        let swing = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(swing.title, "Swing Lady");
        assert_eq!(swing.price.amount_minor, 1200);
        assert!(swing.is_on_sale());
        assert!(!catalog.get(ProductId::new(3)).unwrap().is_on_sale());
    }

    #[test]
    fn test_lookup_miss() {
        let catalog = Catalog::sample();
        assert!(catalog.get(ProductId::new(99)).is_none());
        assert!(!catalog.contains(ProductId::new(99)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let manifest = CatalogManifest {
            products: vec![record(1, 100), record(1, 200)],
        };
        let err = Catalog::from_manifest(&manifest, Currency::USD).unwrap_err();
        assert_eq!(err, ShopError::DuplicateProduct(ProductId::new(1)));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let manifest = CatalogManifest {
            products: vec![record(4, 0)],
        };
        assert!(matches!(
            Catalog::from_manifest(&manifest, Currency::USD),
            Err(ShopError::InvalidPrice { price: 0, .. })
        ));
    }

    #[test]
    fn test_price_too_large_to_total_rejected() {
        let ceiling = i64::MAX / i64::from(MAX_QUANTITY_PER_ENTRY);

        let single = CatalogManifest {
            products: vec![record(1, i64::MAX / 2)],
        };
        assert!(matches!(
            Catalog::from_manifest(&single, Currency::USD),
            Err(ShopError::InvalidPrice { .. })
        ));

        let at_ceiling = CatalogManifest {
            products: vec![record(1, ceiling)],
        };
        assert!(Catalog::from_manifest(&at_ceiling, Currency::USD).is_ok());

        // Each price fits alone, but together they would overflow a full cart.
        let combined = CatalogManifest {
            products: vec![record(1, ceiling - 10), record(2, 11)],
        };
        assert_eq!(
            Catalog::from_manifest(&combined, Currency::USD).unwrap_err(),
            ShopError::InvalidPrice {
                product_id: ProductId::new(2),
                price: 11,
            }
        );
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut bad = record(2, 100);
        bad.title = "   ".to_string();
        let manifest = CatalogManifest { products: vec![bad] };
        assert_eq!(
            Catalog::from_manifest(&manifest, Currency::USD).unwrap_err(),
            ShopError::EmptyTitle(ProductId::new(2))
        );
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::sample();
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["historical", "digital", "anime"]);
    }

    #[test]
    fn test_matches_text() {
        let catalog = Catalog::sample();
        let moon = catalog.get(ProductId::new(4)).unwrap();
        assert!(moon.matches_text("moon"));
        assert!(moon.matches_text("ani"));
        assert!(!moon.matches_text("swing"));
    }
}
