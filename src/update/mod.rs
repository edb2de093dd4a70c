// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Incoming update parsing.
//!
//! The device pushes its state as JSON objects holding any subset of the
//! known keys. [`IncomingUpdate`] gives a typed view of one such object and
//! [`parse_update`] turns a decoded [`Payload`](crate::protocol::Payload)
//! into [`StateChange`](crate::state::StateChange)s ready for dispatch.
//!
//! # Examples
//!
//! ```
//! use rgbw_sync::protocol::decode;
//! use rgbw_sync::state::StateChange;
//! use rgbw_sync::types::RgbColor;
//! use rgbw_sync::update::parse_update;
//!
//! let payload = decode(r#"{"color":{"r":10,"g":20,"b":30}}"#).unwrap();
//! let changes = parse_update(&payload).unwrap();
//! assert_eq!(changes, vec![StateChange::Color(RgbColor::new(10, 20, 30))]);
//! ```

mod parser;

pub use parser::{IncomingUpdate, parse_update};
