// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the light control protocol.
//!
//! # Types
//!
//! - [`DeviceKey`] - Identity of one piece of controllable state
//! - [`Namespace`] - Free-form device-info and settings blocks
//! - [`PowerState`] - On/Off state of the light
//! - [`RgbColor`] - Composite color (r, g, b channels 0-255)
//! - [`RangeBounds`] / [`Fill`] - Declared slider bounds and fill indicator
//! - [`DeviceCommand`] - Restart and factory reset

mod command;
mod key;
mod power;
mod range;
mod rgb_color;

pub use command::DeviceCommand;
pub use key::{DeviceKey, Namespace};
pub use power::PowerState;
pub use range::{Fill, RangeBounds};
pub use rgb_color::RgbColor;
