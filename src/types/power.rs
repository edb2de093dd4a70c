// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of the light.

use std::fmt;

/// Represents the power state of the light.
///
/// On the wire the state is always the string `"ON"` or `"OFF"`.
///
/// # Examples
///
/// ```
/// use rgbw_sync::types::PowerState;
///
/// assert_eq!(PowerState::On.as_str(), "ON");
/// assert_eq!(PowerState::Off.as_str(), "OFF");
/// assert!(PowerState::On.is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerState {
    /// Light is off.
    #[default]
    Off,
    /// Light is on.
    On,
}

impl PowerState {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns `true` if the light is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Interprets a state reported by the device.
    ///
    /// The firmware only ever reports `"OFF"` for a light that is off, so
    /// every other value is read as on.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbw_sync::types::PowerState;
    ///
    /// assert_eq!(PowerState::from_reported("OFF"), PowerState::Off);
    /// assert_eq!(PowerState::from_reported("ON"), PowerState::On);
    /// assert_eq!(PowerState::from_reported("off"), PowerState::On);
    /// ```
    #[must_use]
    pub fn from_reported(value: &str) -> Self {
        if value == Self::Off.as_str() {
            Self::Off
        } else {
            Self::On
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerState> for bool {
    fn from(state: PowerState) -> Self {
        state.is_on()
    }
}
