// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state keys and namespaces.
//!
//! Key names are the ones the firmware uses internally and exposes to Home
//! Assistant, so they double as JSON object keys on the wire.

use std::fmt;

/// Identifies one piece of controllable device state.
///
/// Every bound control owns exactly one key.
///
/// # Examples
///
/// ```
/// use rgbw_sync::types::DeviceKey;
///
/// assert_eq!(DeviceKey::ColorTemp.as_str(), "color_temp");
/// assert!(DeviceKey::Red.is_range());
/// assert!(DeviceKey::Gamma.is_toggle());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceKey {
    /// Power state (`"state"`).
    Power,
    /// Brightness level (`"brightness"`).
    Brightness,
    /// Color temperature in mireds (`"color_temp"`).
    ColorTemp,
    /// Red channel (`"r"`).
    Red,
    /// Green channel (`"g"`).
    Green,
    /// Blue channel (`"b"`).
    Blue,
    /// White channel (`"white_value"`).
    WhiteValue,
    /// Gamma correction flag (`"gamma"`).
    Gamma,
}

impl DeviceKey {
    /// Composite key carrying the three RGB channels.
    pub const COLOR: &'static str = "color";

    /// All keys, in control order.
    pub const ALL: [Self; 8] = [
        Self::Power,
        Self::Brightness,
        Self::ColorTemp,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::WhiteValue,
        Self::Gamma,
    ];

    /// Returns the wire name of the key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "state",
            Self::Brightness => "brightness",
            Self::ColorTemp => "color_temp",
            Self::Red => "r",
            Self::Green => "g",
            Self::Blue => "b",
            Self::WhiteValue => "white_value",
            Self::Gamma => "gamma",
        }
    }

    /// Returns `true` if the key is bound to a toggle control.
    #[must_use]
    pub const fn is_toggle(&self) -> bool {
        matches!(self, Self::Power | Self::Gamma)
    }

    /// Returns `true` if the key is bound to a range control.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        !self.is_toggle()
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace blocks carrying free-form key/value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Device information (`"d"`), display only.
    DeviceInfo,
    /// User settings (`"s"`), displayed and bound to form inputs.
    Settings,
}

impl Namespace {
    /// Returns the wire name of the namespace.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceInfo => "d",
            Self::Settings => "s",
        }
    }

    /// Returns `true` if entries are also written into form inputs.
    #[must_use]
    pub const fn binds_form_inputs(&self) -> bool {
        matches!(self, Self::Settings)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
