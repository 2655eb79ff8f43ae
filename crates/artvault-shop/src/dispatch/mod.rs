//! Interaction dispatch.
//!
//! Every user event enters through [`Storefront::dispatch`]. The event is
//! classified by tag; anything unknown or malformed is ignored rather than
//! faulted.

mod action;
mod storefront;

pub use action::{Action, ActionParseError, RawAction};
pub use storefront::{Outcome, Storefront, StorefrontBuilder};
