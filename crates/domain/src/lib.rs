//! # shoplist-domain
//!
//! Pure domain model for the shopping list.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Items** (one shopping-list entry each) and their insert/patch shapes
//! - Define **Prices** (exact two-place decimal amounts)
//! - Define **Pages** (offset/limit windows over the item list)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod item;
pub mod page;
pub mod price;
