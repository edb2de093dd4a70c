// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Range-bound control.

use std::fmt;

use crate::error::ValueError;
use crate::protocol::Intent;
use crate::types::{DeviceKey, Fill, RangeBounds};

use super::{BoundControl, RangeView, RangeWidget};

/// A bounded numeric control bound to one level key.
///
/// Dragging calls [`slide`](Self::slide) for every intermediate position.
/// Releasing calls [`commit`](Self::commit), the only call that produces an
/// intent. Device updates go through [`set_value`](BoundControl::set_value).
/// All three clamp the value to the bounds and re-render.
pub struct RangeControl {
    key: DeviceKey,
    bounds: RangeBounds,
    value: u16,
    widget: Box<dyn RangeWidget>,
}

impl RangeControl {
    /// Binds a range widget to a device key and renders its initial value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::WrongControlKind` if `key` is not a range key.
    pub fn new(key: DeviceKey, widget: Box<dyn RangeWidget>) -> Result<Self, ValueError> {
        if !key.is_range() {
            return Err(ValueError::WrongControlKind {
                key: key.as_str(),
                kind: "range",
            });
        }
        let bounds = widget.bounds(key);
        let value = bounds.clamp(widget.initial_value());
        let mut control = Self {
            key,
            bounds,
            value,
            widget,
        };
        control.render();
        Ok(control)
    }

    /// Returns the declared bounds.
    #[must_use]
    pub fn bounds(&self) -> RangeBounds {
        self.bounds
    }

    /// Returns the filled portion of the track.
    #[must_use]
    pub fn fill(&self) -> Fill {
        self.bounds.fill(self.value)
    }

    /// Follows the pointer while dragging. Nothing is sent.
    pub fn slide(&mut self, value: u16) {
        self.update(value);
    }

    /// Finishes a drag.
    ///
    /// Returns the intent to send, or `None` for an RGB channel, whose
    /// value is only sent as part of the composite color.
    pub fn commit(&mut self, value: u16) -> Option<Intent> {
        self.update(value);
        tracing::debug!(key = %self.key, value = self.value, "Range committed");
        Intent::level(self.key, self.value)
    }

    fn update(&mut self, value: u16) {
        self.value = self.bounds.clamp(value);
        self.render();
    }

    fn render(&mut self) {
        let view = RangeView {
            value: self.value,
            fill: self.fill(),
        };
        self.widget.render(view);
    }
}

impl BoundControl for RangeControl {
    type Value = u16;

    fn key(&self) -> DeviceKey {
        self.key
    }

    fn value(&self) -> u16 {
        self.value
    }

    fn set_value(&mut self, value: u16) {
        self.update(value);
    }
}

impl fmt::Debug for RangeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeControl")
            .field("key", &self.key)
            .field("bounds", &self.bounds)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
