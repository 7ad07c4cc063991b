//! fm-core: stable foundation for the fluidic machine translator.
//!
//! Contains:
//! - units (uom SI types, constructors and unit-name parsing)
//! - numeric (Real + parsing of untyped block numbers)
//! - ids (stable compact IDs for graph nodes)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FmError, FmResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
