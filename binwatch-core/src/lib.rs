//! Core types, in-memory stores, and demo seeding for the binwatch dashboard.

/// Read-only demo datasets per city.
pub mod catalog;
/// Demo initialization and clearing.
pub mod demo;
/// Identifier generation.
pub mod ids;
/// Domain models and identifiers.
pub mod model;
/// Error type and the randomness seam.
pub mod ports;
/// High-level service facade used by the boundary layer.
pub mod service;
/// Alert and bin stores.
pub mod store;

pub use catalog::*;
pub use demo::*;
pub use ids::*;
pub use model::*;
pub use ports::*;
pub use service::*;
pub use store::*;
