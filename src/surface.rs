// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The control surface: controls, page and dispatcher in one context.
//!
//! [`ControlSurface`] is the entry point for everything the user does and
//! everything the device reports. User interactions take an
//! [`IntentSink`] to send through, which keeps the surface independent of
//! the transport.
//!
//! # Examples
//!
//! ```
//! use rgbw_sync::control::{RangeView, RangeWidget, ToggleWidget, WidgetFactory};
//! use rgbw_sync::page::Page;
//! use rgbw_sync::surface::ControlSurface;
//! use rgbw_sync::types::DeviceKey;
//!
//! struct Headless;
//!
//! struct Switch;
//! impl ToggleWidget for Switch {
//!     fn is_checked(&self) -> bool { false }
//!     fn render(&mut self, _checked: bool) {}
//! }
//!
//! struct Slider;
//! impl RangeWidget for Slider {
//!     fn initial_value(&self) -> u16 { 0 }
//!     fn render(&mut self, _view: RangeView) {}
//! }
//!
//! impl WidgetFactory for Headless {
//!     fn toggle_widget(&mut self, _key: DeviceKey) -> Box<dyn ToggleWidget> { Box::new(Switch) }
//!     fn range_widget(&mut self, _key: DeviceKey) -> Box<dyn RangeWidget> { Box::new(Slider) }
//! }
//!
//! impl Page for Headless {
//!     fn set_title(&mut self, _title: &str) {}
//!     fn set_display(&mut self, _tag: &str, _text: &str) {}
//!     fn set_form_input(&mut self, _id: &str, _value: &str) -> bool { false }
//! }
//!
//! let mut surface = ControlSurface::bind(Headless).unwrap();
//! let mut sent: Vec<String> = Vec::new();
//!
//! surface.commit(DeviceKey::Brightness, 80, &mut sent);
//! assert_eq!(sent, vec![r#"{"brightness":80,"state":"ON"}"#]);
//!
//! surface.handle_message(r#"{"state":"OFF","brightness":12}"#);
//! assert_eq!(surface.snapshot().brightness, 12);
//! assert_eq!(sent.len(), 1);
//! ```

use crate::control::{Controls, WidgetFactory};
use crate::dispatch::StateDispatcher;
use crate::error::{FieldError, ValueError};
use crate::page::Page;
use crate::protocol::IntentSink;
use crate::settings::collect_settings;
use crate::state::LightState;
use crate::types::DeviceKey;

/// Application context owning the controls and the page.
#[derive(Debug)]
pub struct ControlSurface<P> {
    controls: Controls,
    page: P,
    dispatcher: StateDispatcher,
}

impl<P: Page> ControlSurface<P> {
    /// Creates a surface from already bound controls.
    #[must_use]
    pub fn new(controls: Controls, page: P) -> Self {
        Self {
            controls,
            page,
            dispatcher: StateDispatcher::new(),
        }
    }

    /// Binds every control using widgets provided by the page itself.
    ///
    /// # Errors
    ///
    /// Propagates binding errors from [`Controls::bind`].
    pub fn bind(mut page: P) -> Result<Self, ValueError>
    where
        P: WidgetFactory,
    {
        let controls = Controls::bind(&mut page)?;
        Ok(Self::new(controls, page))
    }

    /// Returns the bound controls.
    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Returns the page.
    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Returns the page for mutation.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Returns the title last set on the page.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.dispatcher.title()
    }

    /// Forgets the title parts learned from the device.
    ///
    /// Control values are kept. The first state push of a new channel
    /// overwrites each one the device reports.
    pub fn forget_device_info(&mut self) {
        self.dispatcher.reset();
    }

    /// Returns the values the controls currently hold.
    #[must_use]
    pub fn snapshot(&self) -> LightState {
        self.controls.snapshot()
    }

    /// Handles a click on a toggle.
    ///
    /// Returns `true` if an intent was handed to the sink.
    pub fn toggle(&mut self, key: DeviceKey, sink: &mut impl IntentSink) -> bool {
        match self.controls.toggle_mut(key) {
            Some(control) => {
                let intent = control.toggle();
                sink.send_intent(&intent)
            }
            None => {
                tracing::debug!(key = %key, "No toggle bound to key");
                false
            }
        }
    }

    /// Handles continuous movement of a slider. Nothing is sent.
    pub fn slide(&mut self, key: DeviceKey, value: u16) {
        if let Some(control) = self.controls.range_mut(key) {
            control.slide(value);
        }
    }

    /// Handles the release of a slider.
    ///
    /// RGB channels send the composite color of all three channels.
    /// Returns `true` if an intent was handed to the sink.
    pub fn commit(&mut self, key: DeviceKey, value: u16, sink: &mut impl IntentSink) -> bool {
        let Some(control) = self.controls.range_mut(key) else {
            tracing::debug!(key = %key, "No range bound to key");
            return false;
        };
        let intent = control
            .commit(value)
            .unwrap_or_else(|| self.controls.composite_color().intent());
        sink.send_intent(&intent)
    }

    /// Applies a raw text frame from the device.
    ///
    /// Malformed frames are dropped with a warning. Returns the number of
    /// state changes applied.
    pub fn handle_message(&mut self, raw: &str) -> usize {
        match self
            .dispatcher
            .handle_message(raw, &mut self.controls, &mut self.page)
        {
            Ok(applied) => applied,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping device message");
                0
            }
        }
    }

    /// Validates the settings form and sends it.
    ///
    /// Validation messages on the page are replaced by the new result.
    ///
    /// # Errors
    ///
    /// Returns the rejected fields. Nothing is sent in that case.
    pub fn save_settings(&mut self, sink: &mut impl IntentSink) -> Result<bool, Vec<FieldError>> {
        match collect_settings(&self.page.form_inputs()) {
            Ok(intent) => {
                self.page.show_validation(&[]);
                Ok(sink.send_intent(&intent))
            }
            Err(errors) => {
                self.page.show_validation(&errors);
                Err(errors)
            }
        }
    }
}
