//! Type-safe string key wrappers.
//!
//! Villagers and market items are addressed by short stable keys
//! (`"lily"`, `"honey_cake"`) rather than generated identifiers, so that
//! a seeded game always produces the same keys. Wrapping them prevents a
//! villager key from being passed where an item key is expected.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a key.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

define_key! {
    /// Stable key of a villager (e.g. `"lily"`). The player uses `"player"`.
    VillagerId
}

define_key! {
    /// Stable key of a market item (e.g. `"honey_cake"`).
    ItemKey
}

impl VillagerId {
    /// The key under which villagers track their friendship with the player.
    pub fn player() -> Self {
        Self::new("player")
    }
}
