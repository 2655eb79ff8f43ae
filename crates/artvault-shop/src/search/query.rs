//! Filter criteria built from the storefront controls.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};

/// Sort modes offered by the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Catalog order.
    #[default]
    Default,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
}

impl SortMode {
    /// Parse a sort selector value; unknown values mean `Default`.
    pub fn from_control(s: &str) -> Self {
        match s.trim() {
            "priceAsc" | "price_asc" | "low" => SortMode::PriceAsc,
            "priceDesc" | "price_desc" | "high" => SortMode::PriceDesc,
            _ => SortMode::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::PriceAsc => "priceAsc",
            SortMode::PriceDesc => "priceDesc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Default => "Featured",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
        }
    }
}

/// Category selector value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a category selector value; `all` or blank means every category.
    pub fn from_control(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::parse(trimmed))
        }
    }

    pub fn admits(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

/// Everything the filter/sort engine needs to project the catalog.
///
/// Rebuilt from the control values on every filter event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    pub sort: SortMode,
    /// Trimmed search text; empty means no text filter.
    pub search_text: String,
}

impl FilterCriteria {
    /// Criteria that show the whole catalog in catalog order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Rebuild criteria from raw control values.
    pub fn from_controls(category: &str, sort: &str, search: &str) -> Self {
        Self {
            category: CategoryFilter::from_control(category),
            sort: SortMode::from_control(sort),
            search_text: search.trim().to_string(),
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into().trim().to_string();
        self
    }

    /// Whether a product passes the category and text filters.
    pub fn admits(&self, product: &Product) -> bool {
        if !self.category.admits(&product.category) {
            return false;
        }
        if self.search_text.is_empty() {
            return true;
        }
        product.matches_text(&self.search_text.to_lowercase())
    }
}
