//! Observability for the ArtVault storefront.
//!
//! This crate provides:
//! - `SessionId` - Identifier correlating every log line of one page session
//! - `StructuredLogger` - Structured logging with session context
//! - `LogBuilder` - Fluent construction of entries with typed fields

mod logging;
mod session;

pub use logging::*;
pub use session::*;
