//! # shoplist-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** the storage adapter must implement:
//!   - `ItemRepository` — CRUD plus the search, page, time-window and
//!     aggregate queries over the item table
//! - Define the **driving/inbound** use-case struct:
//!   - `ItemService` — turns missing rows into `NotFound`, validates input,
//!     resolves insert defaults, computes time cut-offs
//!
//! ## Dependency rule
//! Depends on `shoplist-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
