// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WebSocket channel to the device.
//!
//! [`ChannelManager`] owns at most one live channel. Socket I/O runs in a
//! spawned task that reports back through [`ChannelEvent`]s.

mod channel_id;
mod connection;
mod event;
mod manager;

pub use channel_id::ChannelId;
pub use event::{ChannelEvent, ChannelState};
pub use manager::ChannelManager;
