// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot of the values held by the bound controls.

use serde::Serialize;

use crate::types::{PowerState, RgbColor};

/// Values currently shown by the control surface.
///
/// Serializes with the wire key names, which makes it convenient for
/// logging or for handing the state to another front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LightState {
    /// Power state.
    #[serde(rename = "state", serialize_with = "power_str")]
    pub power: PowerState,
    /// Brightness level.
    pub brightness: u16,
    /// Color temperature in mireds.
    pub color_temp: u16,
    /// RGB color.
    pub color: RgbColor,
    /// White channel level.
    pub white_value: u16,
    /// Gamma correction flag.
    pub gamma: bool,
}

impl LightState {
    /// Returns `true` if the light is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_on()
    }
}

fn power_str<S: serde::Serializer>(state: &PowerState, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(state.as_str())
}
