//! Side drawers of the application shell.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Drawer`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawerError {
    /// The identifier is not a known drawer.
    #[error("unknown drawer: {0}")]
    Unknown(String),
}

/// A slide-in panel. At most one drawer is open across the whole shell,
/// so the opened drawer is always modelled as `Option<Drawer>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drawer {
    /// Left drawer holding the navigation menu.
    Menu,
    /// Right drawer holding the side cart.
    Cart,
}

impl Drawer {
    /// Identifier used in URLs and actions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Cart => "cart",
        }
    }
}

impl fmt::Display for Drawer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Drawer {
    type Err = DrawerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(Self::Menu),
            "cart" => Ok(Self::Cart),
            other => Err(DrawerError::Unknown(other.to_string())),
        }
    }
}
