//! # shoplist-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `ItemRepository` port defined in `shoplist-app::ports::storage`
//! - Own the connection handle lifecycle (open, bootstrap the table, close)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `shoplist-app` (for port traits) and `shoplist-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod item_repo;
pub mod pool;

pub use error::StorageError;
pub use item_repo::SqliteItemRepository;
pub use pool::{Config, Database};
