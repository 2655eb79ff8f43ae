//! Cart store and cart entries.

use serde::Serialize;

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::Catalog;
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::Money;

/// Maximum quantity allowed per cart entry.
pub const MAX_QUANTITY_PER_ENTRY: u32 = 9999;

/// One (product, quantity) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    /// Product this entry refers to.
    pub product_id: ProductId,
    /// Always at least 1 while the entry exists.
    pub quantity: u32,
}

/// What a cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new entry was appended at `index`.
    Added { product_id: ProductId, index: usize },
    /// An existing entry's quantity changed.
    QuantityChanged {
        product_id: ProductId,
        index: usize,
        quantity: u32,
    },
    /// The entry previously at `index` was deleted; later entries shifted down.
    Removed { product_id: ProductId, index: usize },
    /// Every entry was deleted.
    Cleared { removed: Vec<ProductId> },
    /// Nothing happened (unknown product, stale index, quantity cap).
    Unchanged,
}

impl CartChange {
    /// Whether the cart was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, CartChange::Unchanged)
    }
}

/// The session's cart.
///
/// Entries are kept in first-add order. There is at most one entry per
/// product and no entry ever holds quantity 0. The entry list is private;
/// every mutation goes through the operations below.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry, or appends a new entry with quantity
    /// 1. Unknown products are ignored.
    pub fn add(&mut self, catalog: &Catalog, product_id: ProductId) -> CartChange {
        if !catalog.contains(product_id) {
            return CartChange::Unchanged;
        }

        match self.position_of(product_id) {
            Some(index) => self.increment_at(index),
            None => {
                self.entries.push(CartEntry {
                    product_id,
                    quantity: 1,
                });
                CartChange::Added {
                    product_id,
                    index: self.entries.len() - 1,
                }
            }
        }
    }

    /// Increase the quantity of the entry at `index` by one.
    pub fn increment_at(&mut self, index: usize) -> CartChange {
        let Some(entry) = self.entries.get_mut(index) else {
            return CartChange::Unchanged;
        };
        if entry.quantity >= MAX_QUANTITY_PER_ENTRY {
            return CartChange::Unchanged;
        }

        entry.quantity += 1;
        CartChange::QuantityChanged {
            product_id: entry.product_id,
            index,
            quantity: entry.quantity,
        }
    }

    /// Decrease the quantity of the entry at `index` by one.
    ///
    /// An entry at quantity 1 is removed instead of being kept at zero.
    pub fn decrement_at(&mut self, index: usize) -> CartChange {
        let Some(entry) = self.entries.get_mut(index) else {
            return CartChange::Unchanged;
        };
        if entry.quantity <= 1 {
            return self.remove_at(index);
        }

        entry.quantity -= 1;
        CartChange::QuantityChanged {
            product_id: entry.product_id,
            index,
            quantity: entry.quantity,
        }
    }

    /// Remove the entry at `index`. Later entries shift down by one.
    pub fn remove_at(&mut self, index: usize) -> CartChange {
        if index >= self.entries.len() {
            return CartChange::Unchanged;
        }
        let removed = self.entries.remove(index);
        CartChange::Removed {
            product_id: removed.product_id,
            index,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> CartChange {
        if self.entries.is_empty() {
            return CartChange::Unchanged;
        }
        let removed = self.entries.drain(..).map(|e| e.product_id).collect();
        CartChange::Cleared { removed }
    }

    /// Entries in first-add order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CartEntry> {
        self.entries.get(index)
    }

    /// Index of the entry for a product, if present.
    pub fn position_of(&self, product_id: ProductId) -> Option<usize> {
        self.entries.iter().position(|e| e.product_id == product_id)
    }

    /// Whether the product has an entry (quantity is then at least 1).
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.position_of(product_id).is_some()
    }

    /// Quantity held for a product, 0 if absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.position_of(product_id)
            .map(|i| self.entries[i].quantity)
            .unwrap_or(0)
    }

    /// Number of distinct entries. This is the number shown on cart badges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of quantities across entries.
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Price every entry that still resolves in the catalog.
    ///
    /// Returns an error only on arithmetic overflow.
    pub fn pricing(&self, catalog: &Catalog) -> Result<CartPricing, ShopError> {
        let lines = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                catalog
                    .get(entry.product_id)
                    .map(|product| (index, entry, product.price))
            })
            .map(|(index, entry, unit_price)| -> Result<LinePricing, ShopError> {
                let line_total = unit_price
                    .try_multiply(i64::from(entry.quantity))
                    .ok_or(ShopError::Overflow)?;
                Ok(LinePricing {
                    index,
                    product_id: entry.product_id,
                    unit_price,
                    quantity: entry.quantity,
                    line_total,
                })
            })
            .collect::<Result<Vec<_>, ShopError>>()?;

        let total = Money::try_sum(lines.iter().map(|l| &l.line_total), catalog.currency())
            .ok_or(ShopError::Overflow)?;

        Ok(CartPricing { lines, total })
    }

    /// Cart-wide total, skipping dangling entries.
    pub fn total(&self, catalog: &Catalog) -> Result<Money, ShopError> {
        self.pricing(catalog).map(|p| p.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogManifest, ProductRecord};
    use crate::money::Currency;

    fn id(n: u64) -> ProductId {
        ProductId::new(n)
    }

    fn two_piece_catalog() -> Catalog {
        let manifest = CatalogManifest {
            products: [(1, 1200), (2, 1000)]
                .into_iter()
                .map(|(n, price)| ProductRecord {
                    id: id(n),
                    title: format!("Piece {}", n),
                    category: crate::catalog::Category::Digital,
                    price,
                    old_price: None,
                    image: String::new(),
                })
                .collect(),
        };
        Catalog::from_manifest(&manifest, Currency::USD).unwrap()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_add_same_product_increments() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();

        assert_eq!(
            cart.add(&catalog, id(1)),
            CartChange::Added {
                product_id: id(1),
                index: 0
            }
        );
        assert_eq!(
            cart.add(&catalog, id(1)),
            CartChange::QuantityChanged {
                product_id: id(1),
                index: 0,
                quantity: 2
            }
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(id(1)), 2);
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        assert_eq!(cart.add(&catalog, id(42)), CartChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_pricing_scenario() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, id(1));
        cart.add(&catalog, id(1));
        cart.add(&catalog, id(2));

        assert_eq!(
            cart.entries(),
            &[
                CartEntry {
                    product_id: id(1),
                    quantity: 2
                },
                CartEntry {
                    product_id: id(2),
                    quantity: 1
                },
            ]
        );
        assert_eq!(cart.total(&catalog).unwrap().amount_minor, 3400);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_decrement_to_zero_removes() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, id(1));
        cart.add(&catalog, id(2));

        assert_eq!(
            cart.decrement_at(0),
            CartChange::Removed {
                product_id: id(1),
                index: 0
            }
        );
        assert_eq!(cart.len(), 1);
        assert!(cart.entries().iter().all(|e| e.quantity >= 1));
        assert_eq!(cart.get(0).unwrap().product_id, id(2));
    }

    #[test]
    fn test_decrement_above_one_keeps_entry() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, id(1));
        cart.increment_at(0);
        cart.increment_at(0);

        assert_eq!(
            cart.decrement_at(0),
            CartChange::QuantityChanged {
                product_id: id(1),
                index: 0,
                quantity: 2
            }
        );
    }

    #[test]
    fn test_remove_shifts_indices() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, id(1));
        cart.add(&catalog, id(2));

        cart.remove_at(0);
        // Index 0 now addresses the former second entry.
        cart.increment_at(0);
        assert_eq!(cart.quantity_of(id(2)), 2);
        assert_eq!(cart.remove_at(1), CartChange::Unchanged);
    }

    #[test]
    fn test_out_of_range_indices_are_noops() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, id(1));
        let before = cart.clone();

        assert_eq!(cart.remove_at(1), CartChange::Unchanged);
        assert_eq!(cart.remove_at(usize::MAX), CartChange::Unchanged);
        assert_eq!(cart.increment_at(5), CartChange::Unchanged);
        assert_eq!(cart.decrement_at(5), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_quantity_cap() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, id(1));
        for _ in 1..MAX_QUANTITY_PER_ENTRY {
            cart.increment_at(0);
        }
        assert_eq!(cart.quantity_of(id(1)), MAX_QUANTITY_PER_ENTRY);
        assert_eq!(cart.add(&catalog, id(1)), CartChange::Unchanged);
        assert_eq!(cart.quantity_of(id(1)), MAX_QUANTITY_PER_ENTRY);
    }

    #[test]
    fn test_clear() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        assert_eq!(cart.clear(), CartChange::Unchanged);

        cart.add(&catalog, id(2));
        cart.add(&catalog, id(1));
        assert_eq!(
            cart.clear(),
            CartChange::Cleared {
                removed: vec![id(2), id(1)]
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_pricing_skips_dangling_entries() {
        let catalog = two_piece_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, id(1));
        cart.add(&catalog, id(2));

        // Reload with a catalog that no longer has product 1.
        let reloaded = Catalog::from_manifest(
            &CatalogManifest {
                products: vec![ProductRecord {
                    id: id(2),
                    title: "Piece 2".into(),
                    category: crate::catalog::Category::Digital,
                    price: 1000,
                    old_price: None,
                    image: String::new(),
                }],
            },
            Currency::USD,
        )
        .unwrap();

        let pricing = cart.pricing(&reloaded).unwrap();
        assert_eq!(pricing.lines.len(), 1);
        assert_eq!(pricing.lines[0].index, 1);
        assert_eq!(pricing.total.amount_minor, 1000);
    }
}
