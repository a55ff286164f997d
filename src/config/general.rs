//! The general configuration settings for fstation.
//!
//! [General] is deserialized from the `[general]` table of `station.toml` and carries the sort
//! order a freshly loaded listing starts with.

use crate::app::{SortDirection, SortKey};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct General {
    sort: SortKey,
    direction: SortDirection,
}

impl General {
    #[inline]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    #[inline]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}
