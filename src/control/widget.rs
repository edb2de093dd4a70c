// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Presentation seams for the bound controls.
//!
//! A control owns its value and pushes every change to a widget. Widgets
//! never feed values back except through the initial `is_checked` and
//! `initial_value` reads made when the control is bound.

use crate::types::{DeviceKey, Fill, RangeBounds};

/// An on/off element, such as a checkbox or a switch.
pub trait ToggleWidget: Send {
    /// Checked state declared by the element before binding.
    fn is_checked(&self) -> bool;

    /// Shows the given checked state.
    fn render(&mut self, checked: bool);
}

/// What a range widget shows after a value change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeView {
    /// Current value, already clamped to the bounds.
    pub value: u16,
    /// Filled portion of the track.
    pub fill: Fill,
}

impl RangeView {
    /// Text for the adjacent numeric readout.
    #[must_use]
    pub fn readout(&self) -> String {
        self.value.to_string()
    }
}

/// A slider element with a track fill and an optional readout.
pub trait RangeWidget: Send {
    /// Bounds declared by the element.
    ///
    /// Defaults to the bounds the device uses for `key`.
    fn bounds(&self, key: DeviceKey) -> RangeBounds {
        RangeBounds::for_key(key)
    }

    /// Value declared by the element before binding.
    fn initial_value(&self) -> u16;

    /// Shows the given value.
    fn render(&mut self, view: RangeView);
}

/// Looks up the widget bound to each device key.
///
/// Implemented by the host page so that [`Controls::bind`](super::Controls::bind)
/// can build the full control set in one call.
pub trait WidgetFactory {
    /// Returns the toggle widget for `key`.
    fn toggle_widget(&mut self, key: DeviceKey) -> Box<dyn ToggleWidget>;

    /// Returns the range widget for `key`.
    fn range_widget(&mut self, key: DeviceKey) -> Box<dyn RangeWidget>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_is_plain_number() {
        let view = RangeView {
            value: 128,
            fill: RangeBounds::LEVEL.fill(128),
        };
        assert_eq!(view.readout(), "128");
    }
}
