//! Static catalog manifest.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::ids::ProductId;

/// One product record as supplied by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub category: Category,
    /// Price in minor currency units.
    pub price: i64,
    /// Compare-at price in minor currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<i64>,
    #[serde(default)]
    pub image: String,
}

/// Ordered list of product records injected at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogManifest {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

impl CatalogManifest {
    /// The sample gallery the storefront ships with.
    pub fn sample() -> Self {
        let record = |id: u64,
                      title: &str,
                      category: Category,
                      price: i64,
                      old_price: Option<i64>,
                      image: &str| ProductRecord {
            id: ProductId::new(id),
            title: title.to_string(),
            category,
            price,
            old_price,
            image: image.to_string(),
        };

        Self {
            products: vec![
                record(1, "Swing Lady", Category::Historical, 1200, Some(2000), "assets/images/historical.jpg"),
                record(2, "Red Flowers", Category::Digital, 1000, Some(2000), "assets/images/red-flowers.jpg"),
                record(3, "Mystic Window", Category::Digital, 480, None, "assets/images/window-girl.jpg"),
                record(4, "Moon Light", Category::Anime, 1600, None, "assets/images/moon.jpg"),
                record(5, "Sailor Cat", Category::Anime, 1000, Some(1600), "assets/images/blue-eye-kitten.jpg"),
                record(6, "Girl with Earring", Category::Historical, 3000, Some(4500), "assets/images/pearl-earring.jpg"),
            ],
        }
    }
}
