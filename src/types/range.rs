// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declared bounds of a range widget and its fill indicator.

use std::fmt;

use crate::error::ValueError;

use super::DeviceKey;

/// Inclusive `[min, max]` bounds declared by a range widget.
///
/// # Examples
///
/// ```
/// use rgbw_sync::types::RangeBounds;
///
/// let bounds = RangeBounds::new(0, 200).unwrap();
/// assert_eq!(bounds.clamp(250), 200);
/// assert_eq!(bounds.fill(50).to_string(), "25%");
///
/// // Inverted bounds are rejected
/// assert!(RangeBounds::new(10, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeBounds {
    min: u16,
    max: u16,
}

impl RangeBounds {
    /// Eight-bit channel level used by brightness, white and RGB sliders.
    pub const LEVEL: Self = Self { min: 0, max: 255 };

    /// Color temperature in mireds (153 is ~6500K, 500 is ~2000K).
    pub const MIREDS: Self = Self { min: 153, max: 500 };

    /// Creates new bounds.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvertedRange` if `min` is greater than `max`.
    pub fn new(min: u16, max: u16) -> Result<Self, ValueError> {
        if min > max {
            return Err(ValueError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns the default bounds for a range key.
    #[must_use]
    pub const fn for_key(key: DeviceKey) -> Self {
        match key {
            DeviceKey::ColorTemp => Self::MIREDS,
            _ => Self::LEVEL,
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> u16 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> u16 {
        self.max
    }

    /// Clamps a value into the bounds.
    #[must_use]
    pub fn clamp(&self, value: u16) -> u16 {
        value.clamp(self.min, self.max)
    }

    /// Computes the fill indicator for a value.
    ///
    /// The value is clamped first. Degenerate bounds (`min == max`) always
    /// yield a zero fill.
    #[must_use]
    pub fn fill(&self, value: u16) -> Fill {
        if self.max == self.min {
            return Fill::EMPTY;
        }
        let value = self.clamp(value);
        let span = f32::from(self.max - self.min);
        Fill(f32::from(value - self.min) / span * 100.0)
    }
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self::LEVEL
    }
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Fill percentage of a range widget (0.0 to 100.0).
///
/// Displays as a CSS percentage, e.g. `"37.5%"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Fill(f32);

impl Fill {
    /// An empty indicator.
    pub const EMPTY: Self = Self(0.0);

    /// Returns the percentage.
    #[must_use]
    pub const fn percent(&self) -> f32 {
        self.0
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
