// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel identifier type.

use std::fmt;

use uuid::Uuid;

/// Identifies one connection attempt.
///
/// Every call to [`ChannelManager::connect`](super::ChannelManager::connect)
/// creates a fresh identifier, so events still in flight from a replaced
/// channel can be told apart from those of the live one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(Uuid);

impl ChannelId {
    /// Creates a new unique channel identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.simple().to_string()[..8];
        write!(f, "ChannelId({short})")
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(ChannelId::new(), ChannelId::new());
    }

    #[test]
    fn debug_is_short() {
        let id = ChannelId::new();
        let debug = format!("{id:?}");
        assert!(debug.starts_with("ChannelId("));
        assert_eq!(debug.len(), "ChannelId()".len() + 8);
    }
}
