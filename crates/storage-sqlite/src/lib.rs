//! SQLite storage implementation for the gift list organizer.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `giftlist-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Table bootstrap for the recipient and gift tables
//! - Repository implementations for recipients and gifts
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!  storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod gifts;
pub mod recipients;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, initialize_schema, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from giftlist-core for convenience
pub use giftlist_core::errors::{DatabaseError, Error, Result};
