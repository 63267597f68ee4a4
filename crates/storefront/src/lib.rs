//! Vitrine storefront library.
//!
//! The presentation layer of the storefront: a Flux state layer, the
//! components rendered from it, and the axum server that renders pages
//! server-side. Built as a library so it can be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod assets;
pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
mod filters;
pub mod flux;
pub mod i18n;
pub mod pages;
pub mod routes;
pub mod state;
