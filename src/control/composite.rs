// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Composite color intent built from the three RGB channel controls.

use crate::protocol::Intent;
use crate::types::RgbColor;

use super::{BoundControl, RangeControl};

/// Reads the red, green and blue controls as one color.
#[derive(Debug, Clone, Copy)]
pub struct CompositeColor<'a> {
    red: &'a RangeControl,
    green: &'a RangeControl,
    blue: &'a RangeControl,
}

impl<'a> CompositeColor<'a> {
    /// Groups the three channel controls.
    #[must_use]
    pub fn new(red: &'a RangeControl, green: &'a RangeControl, blue: &'a RangeControl) -> Self {
        Self { red, green, blue }
    }

    /// Returns the color the channel controls currently hold.
    ///
    /// Channel bounds wider than a byte saturate at 255.
    #[must_use]
    pub fn color(&self) -> RgbColor {
        let channel = |control: &RangeControl| u8::try_from(control.value()).unwrap_or(u8::MAX);
        RgbColor::new(channel(self.red), channel(self.green), channel(self.blue))
    }

    /// Builds the color intent from the current channel values.
    #[must_use]
    pub fn intent(&self) -> Intent {
        Intent::Color(self.color())
    }
}
