// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controls bound to device state keys.
//!
//! Each control holds the authoritative local copy of one value and drives
//! a widget supplied by the host page. Two kinds exist:
//!
//! - [`ToggleControl`] for the power and gamma flags
//! - [`RangeControl`] for the bounded levels and the RGB channels
//!
//! Values set from device updates never produce intents. Only user
//! interaction does, through [`ToggleControl::toggle`] and
//! [`RangeControl::commit`].

mod composite;
mod range;
mod set;
mod toggle;
mod widget;

pub use composite::CompositeColor;
pub use range::RangeControl;
pub use set::Controls;
pub use toggle::ToggleControl;
pub use widget::{RangeView, RangeWidget, ToggleWidget, WidgetFactory};

use crate::types::DeviceKey;

/// A control bound to one device key.
pub trait BoundControl {
    /// The value type held by the control.
    type Value: Copy;

    /// Returns the key the control is bound to.
    fn key(&self) -> DeviceKey;

    /// Returns the current value.
    fn value(&self) -> Self::Value;

    /// Applies an authoritative value from the device and re-renders.
    ///
    /// Never produces an intent.
    fn set_value(&mut self, value: Self::Value);
}
