// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! [`StateChange`] is one authoritative change decoded from an incoming
//! update. [`LightState`] is a snapshot of what the controls currently show.

mod light_state;
mod state_change;

pub use light_state::LightState;
pub use state_change::{Fields, StateChange};
