//! Gift List Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for tracking gift recipients and
//! their wishlists. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod recipients;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
