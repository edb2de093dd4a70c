// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rgbw_sync` - state synchronization for the web control surface of an
//! RGBW light.
//!
//! The light pushes its state over a WebSocket as JSON objects and accepts
//! change requests in the same format. This crate keeps a set of bound
//! controls in step with that state in both directions:
//!
//! - **Device to controls**: incoming frames are decoded, typed and routed
//!   to the matching control or page element. Nothing is sent back.
//! - **Controls to device**: user interaction produces exactly one intent,
//!   encoded and sent over the live channel.
//!
//! # Supported State
//!
//! - Power and gamma correction flags
//! - Brightness, color temperature and white channel levels
//! - RGB color, sent as one composite value
//! - Device information and settings blocks, shown on the page
//! - Restart and reset commands with a reconnect afterwards
//!
//! # Quick Start
//!
//! ```no_run
//! use rgbw_sync::control::{RangeView, RangeWidget, ToggleWidget, WidgetFactory};
//! use rgbw_sync::page::Page;
//! use rgbw_sync::{ControlSurface, DeviceKey, Session, SessionConfig};
//!
//! struct Terminal;
//!
//! struct Flag(bool);
//! impl ToggleWidget for Flag {
//!     fn is_checked(&self) -> bool { self.0 }
//!     fn render(&mut self, checked: bool) { self.0 = checked; }
//! }
//!
//! struct Level;
//! impl RangeWidget for Level {
//!     fn initial_value(&self) -> u16 { 0 }
//!     fn render(&mut self, view: RangeView) { println!("{} ({})", view.readout(), view.fill); }
//! }
//!
//! impl WidgetFactory for Terminal {
//!     fn toggle_widget(&mut self, _key: DeviceKey) -> Box<dyn ToggleWidget> { Box::new(Flag(false)) }
//!     fn range_widget(&mut self, _key: DeviceKey) -> Box<dyn RangeWidget> { Box::new(Level) }
//! }
//!
//! impl Page for Terminal {
//!     fn set_title(&mut self, title: &str) { println!("== {title} =="); }
//!     fn set_display(&mut self, tag: &str, text: &str) { println!("{tag}: {text}"); }
//!     fn set_form_input(&mut self, _id: &str, _value: &str) -> bool { false }
//! }
//!
//! #[tokio::main]
//! async fn main() -> rgbw_sync::Result<()> {
//!     let surface = ControlSurface::bind(Terminal)?;
//!     let mut session = Session::new(SessionConfig::new("192.168.1.40"), surface);
//!     session.start()?;
//!
//!     loop {
//!         let event = session.step().await;
//!         println!("{event:?}");
//!         if session.channel_state().is_open() {
//!             session.commit(DeviceKey::Brightness, 128);
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "websocket")]
pub mod channel;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod page;
pub mod protocol;
#[cfg(feature = "websocket")]
pub mod session;
pub mod settings;
pub mod state;
pub mod surface;
pub mod types;
pub mod update;

#[cfg(feature = "websocket")]
pub use channel::{ChannelEvent, ChannelId, ChannelManager, ChannelState};
pub use config::SessionConfig;
pub use control::{BoundControl, Controls, RangeControl, ToggleControl};
pub use dispatch::StateDispatcher;
pub use error::{Error, FieldError, ParseError, ProtocolError, Result, ValidationError, ValueError};
pub use page::{FormInput, Page};
pub use protocol::{Intent, IntentSink, Payload, decode, encode};
#[cfg(feature = "websocket")]
pub use session::{Prompt, Session, SessionEvent};
pub use state::{LightState, StateChange};
pub use surface::ControlSurface;
pub use types::{DeviceCommand, DeviceKey, Fill, Namespace, PowerState, RangeBounds, RgbColor};
