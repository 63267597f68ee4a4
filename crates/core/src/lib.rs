//! Vitrine Core - Shared domain types.
//!
//! This crate provides the types the storefront presentation layer reads:
//! products, navigation collections, accounts, orders, notifications and drawers,
//! together with the locale and pricing types they are built from.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! rendering, no state management. Entities defined here are read-only from
//! the view layer's perspective.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, locales, prices and UI state values
//! - [`slug`] - Deterministic URL slug derivation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod slug;
pub mod types;

pub use slug::slugify;
pub use types::*;
