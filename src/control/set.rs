// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The full set of controls bound to one device.

use crate::error::ValueError;
use crate::state::LightState;
use crate::types::{DeviceKey, PowerState};

use super::{BoundControl, CompositeColor, RangeControl, ToggleControl, WidgetFactory};

/// One control for every device key.
#[derive(Debug)]
pub struct Controls {
    power: ToggleControl,
    brightness: RangeControl,
    color_temp: RangeControl,
    red: RangeControl,
    green: RangeControl,
    blue: RangeControl,
    white_value: RangeControl,
    gamma: ToggleControl,
}

impl Controls {
    /// Binds a control to every device key using widgets from `factory`.
    ///
    /// # Errors
    ///
    /// Propagates binding errors from the individual controls.
    pub fn bind(factory: &mut impl WidgetFactory) -> Result<Self, ValueError> {
        let mut toggle = |key: DeviceKey| ToggleControl::new(key, factory.toggle_widget(key));
        let power = toggle(DeviceKey::Power)?;
        let gamma = toggle(DeviceKey::Gamma)?;

        let mut range = |key: DeviceKey| RangeControl::new(key, factory.range_widget(key));
        let controls = Self {
            power,
            brightness: range(DeviceKey::Brightness)?,
            color_temp: range(DeviceKey::ColorTemp)?,
            red: range(DeviceKey::Red)?,
            green: range(DeviceKey::Green)?,
            blue: range(DeviceKey::Blue)?,
            white_value: range(DeviceKey::WhiteValue)?,
            gamma,
        };
        tracing::debug!(state = ?controls.snapshot(), "Controls bound");
        Ok(controls)
    }

    /// Returns the toggle control bound to `key`.
    #[must_use]
    pub fn toggle(&self, key: DeviceKey) -> Option<&ToggleControl> {
        match key {
            DeviceKey::Power => Some(&self.power),
            DeviceKey::Gamma => Some(&self.gamma),
            _ => None,
        }
    }

    /// Returns the toggle control bound to `key` for mutation.
    pub fn toggle_mut(&mut self, key: DeviceKey) -> Option<&mut ToggleControl> {
        match key {
            DeviceKey::Power => Some(&mut self.power),
            DeviceKey::Gamma => Some(&mut self.gamma),
            _ => None,
        }
    }

    /// Returns the range control bound to `key`.
    #[must_use]
    pub fn range(&self, key: DeviceKey) -> Option<&RangeControl> {
        match key {
            DeviceKey::Brightness => Some(&self.brightness),
            DeviceKey::ColorTemp => Some(&self.color_temp),
            DeviceKey::Red => Some(&self.red),
            DeviceKey::Green => Some(&self.green),
            DeviceKey::Blue => Some(&self.blue),
            DeviceKey::WhiteValue => Some(&self.white_value),
            DeviceKey::Power | DeviceKey::Gamma => None,
        }
    }

    /// Returns the range control bound to `key` for mutation.
    pub fn range_mut(&mut self, key: DeviceKey) -> Option<&mut RangeControl> {
        match key {
            DeviceKey::Brightness => Some(&mut self.brightness),
            DeviceKey::ColorTemp => Some(&mut self.color_temp),
            DeviceKey::Red => Some(&mut self.red),
            DeviceKey::Green => Some(&mut self.green),
            DeviceKey::Blue => Some(&mut self.blue),
            DeviceKey::WhiteValue => Some(&mut self.white_value),
            DeviceKey::Power | DeviceKey::Gamma => None,
        }
    }

    /// Groups the RGB channel controls.
    #[must_use]
    pub fn composite_color(&self) -> CompositeColor<'_> {
        CompositeColor::new(&self.red, &self.green, &self.blue)
    }

    /// Returns the values the controls currently hold.
    #[must_use]
    pub fn snapshot(&self) -> LightState {
        LightState {
            power: PowerState::from(self.power.value()),
            brightness: self.brightness.value(),
            color_temp: self.color_temp.value(),
            color: self.composite_color().color(),
            white_value: self.white_value.value(),
            gamma: self.gamma.value(),
        }
    }
}
