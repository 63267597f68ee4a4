//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod account;
pub mod collection;
pub mod drawer;
pub mod id;
pub mod locale;
pub mod notification;
pub mod order;
pub mod price;
pub mod product;

pub use account::{Account, Role};
pub use collection::{CollectionNode, CollectionsTree, NavigationCollection};
pub use drawer::{Drawer, DrawerError};
pub use id::*;
pub use locale::{Locale, LocaleError, LocalizedText};
pub use notification::{Notification, NotificationKind};
pub use order::{FulfillmentStatus, Order};
pub use price::{CurrencyCode, CurrencyError, Pricing};
pub use product::{Product, ProductImage};
