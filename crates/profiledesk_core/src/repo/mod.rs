//! Profile store contract and adapters.
//!
//! # Responsibility
//! - Define the store operations the services depend on.
//! - Provide HTTP and SQLite implementations of that contract.

pub mod http_store;
pub mod profile_store;
pub mod sqlite_store;
