//! Unidirectional state management.
//!
//! # Data flow
//!
//! ```text
//! view interaction ──dispatch(Action)──▶ stores ──changed StoreSet──▶ subscribers
//!        ▲                                                             │
//!        └──────────────── re-read through StoreReader ◀───────────────┘
//! ```
//!
//! - [`Action`] - named intents; the only input that mutates state
//! - [`stores`] - one store per UI state slice, each the single writer of it
//! - [`FluxContext`] - dispatch, synchronous reads and subscriptions
//! - [`Subscription`] - RAII registration; dropping it unsubscribes

mod action;
mod context;
mod error;
mod store;
pub mod stores;

pub use action::{Action, RequestId};
pub use context::{FluxContext, StoreReader, Subscription};
pub use error::FluxError;
pub use store::{Store, StoreId, StoreSet};
