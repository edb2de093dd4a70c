// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are the typed form of an incoming update. Each one targets
//! either a bound control or one of the free-form namespace blocks.

use std::collections::BTreeMap;

use crate::types::{PowerState, RgbColor};

/// Display text of a namespace block, keyed by field name.
pub type Fields = BTreeMap<String, String>;

/// One authoritative change reported by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Power state changed.
    Power(PowerState),
    /// Brightness level changed.
    Brightness(u16),
    /// Color temperature changed.
    ColorTemp(u16),
    /// RGB color changed.
    Color(RgbColor),
    /// White channel level changed.
    WhiteValue(u16),
    /// Gamma correction was switched.
    Gamma(bool),
    /// Device information block.
    DeviceInfo(Fields),
    /// Settings block.
    Settings(Fields),
}
