//! Search module.
//!
//! Contains the filter criteria and the pure filter/sort projection over
//! the catalog.

mod filter;
mod query;

pub use filter::project;
pub use query::{CategoryFilter, FilterCriteria, SortMode};
