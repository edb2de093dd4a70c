// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel lifecycle events and states.

use std::fmt;

use super::ChannelId;

/// Something that happened on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The connection was established.
    Open,
    /// The connection ended.
    Closed {
        /// Close reason given by the peer, or a description of the failure.
        reason: String,
    },
    /// The connection failed. A `Closed` event follows.
    Error {
        /// What went wrong.
        detail: String,
    },
    /// A text frame arrived.
    Message(String),
}

impl ChannelEvent {
    /// Returns `true` for events that end the channel.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

/// An event together with the channel that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TaggedEvent {
    pub(crate) channel: ChannelId,
    pub(crate) event: ChannelEvent,
}

/// Lifecycle state of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelState {
    /// No channel has been opened.
    #[default]
    Disconnected,
    /// The connection handshake is in progress.
    Connecting,
    /// Text frames can be sent.
    Open,
    /// The channel was closed by either side.
    Closed,
    /// The channel failed.
    Errored,
}

impl ChannelState {
    /// Returns `true` if payloads can be sent.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Errored => "errored",
        };
        f.write_str(s)
    }
}
