// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Toggle-bound control.

use std::fmt;

use crate::error::ValueError;
use crate::protocol::Intent;
use crate::types::{DeviceKey, PowerState};

use super::{BoundControl, ToggleWidget};

/// A boolean control bound to [`DeviceKey::Power`] or [`DeviceKey::Gamma`].
///
/// User interaction goes through [`toggle`](Self::toggle), which returns the
/// intent to send. Device updates go through
/// [`set_value`](BoundControl::set_value), which only re-renders.
pub struct ToggleControl {
    key: DeviceKey,
    checked: bool,
    widget: Box<dyn ToggleWidget>,
}

impl ToggleControl {
    /// Binds a toggle widget to a device key.
    ///
    /// The initial value is read from the widget.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::WrongControlKind` if `key` is not a toggle key.
    pub fn new(key: DeviceKey, widget: Box<dyn ToggleWidget>) -> Result<Self, ValueError> {
        if !key.is_toggle() {
            return Err(ValueError::WrongControlKind {
                key: key.as_str(),
                kind: "toggle",
            });
        }
        let checked = widget.is_checked();
        Ok(Self {
            key,
            checked,
            widget,
        })
    }

    /// Returns `true` if the control is checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Flips the value after a user interaction.
    ///
    /// The new value is rendered at once and the returned intent should be
    /// sent exactly once.
    pub fn toggle(&mut self) -> Intent {
        self.checked = !self.checked;
        self.widget.render(self.checked);
        tracing::debug!(key = %self.key, checked = self.checked, "Toggle flipped");
        self.intent()
    }

    fn intent(&self) -> Intent {
        match self.key {
            DeviceKey::Power => Intent::Power(PowerState::from(self.checked)),
            _ => Intent::Gamma(self.checked),
        }
    }
}

impl BoundControl for ToggleControl {
    type Value = bool;

    fn key(&self) -> DeviceKey {
        self.key
    }

    fn value(&self) -> bool {
        self.checked
    }

    fn set_value(&mut self, value: bool) {
        self.checked = value;
        self.widget.render(value);
    }
}

impl fmt::Debug for ToggleControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleControl")
            .field("key", &self.key)
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}
