// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routing of incoming state to controls and page elements.
//!
//! | Key | Destination |
//! |-----|-------------|
//! | `d` | display elements per nested key, `app_name` sets the title |
//! | `s` | display elements and form inputs per nested key, `hostname` joins the title |
//! | `state` | power toggle |
//! | `brightness`, `color_temp`, `white_value` | matching range control |
//! | `color` | the three RGB range controls |
//! | `gamma` | gamma toggle |
//!
//! Unknown keys are ignored. Messages that are not JSON objects, or that
//! carry a known key with an unusable value, are dropped whole.

use crate::control::{BoundControl, Controls};
use crate::error::ParseError;
use crate::page::Page;
use crate::protocol::decode;
use crate::state::{Fields, StateChange};
use crate::types::{DeviceKey, Namespace};
use crate::update::parse_update;

/// Device info entry holding the application name.
pub const APP_NAME_FIELD: &str = "app_name";

/// Settings entry holding the device hostname.
pub const HOSTNAME_FIELD: &str = "hostname";

/// Applies incoming state to the controls and the page.
///
/// Remembers the application name and hostname so the title can be rebuilt
/// whenever either arrives.
#[derive(Debug, Default)]
pub struct StateDispatcher {
    app_name: Option<String>,
    hostname: Option<String>,
}

impl StateDispatcher {
    /// Creates a dispatcher with no title parts known yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current page title, if any part of it is known.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match (&self.app_name, &self.hostname) {
            (Some(app), Some(host)) => Some(format!("{app} - {host}")),
            (Some(part), None) | (None, Some(part)) => Some(part.clone()),
            (None, None) => None,
        }
    }

    /// Forgets the application name and hostname.
    pub fn reset(&mut self) {
        self.app_name = None;
        self.hostname = None;
    }

    /// Decodes a raw text frame and applies it.
    ///
    /// Returns the number of state changes applied.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the frame is not a JSON object or if a known
    /// key has an unusable value. Nothing is applied in that case.
    pub fn handle_message(
        &mut self,
        raw: &str,
        controls: &mut Controls,
        page: &mut impl Page,
    ) -> Result<usize, ParseError> {
        let payload = decode(raw)
            .ok_or_else(|| ParseError::UnexpectedFormat("expected a JSON object".to_string()))?;
        let changes = parse_update(&payload)?;
        for change in &changes {
            self.apply(change, controls, page);
        }
        Ok(changes.len())
    }

    /// Routes one state change.
    pub fn apply(&mut self, change: &StateChange, controls: &mut Controls, page: &mut impl Page) {
        match change {
            StateChange::DeviceInfo(fields) => self.apply_block(Namespace::DeviceInfo, fields, page),
            StateChange::Settings(fields) => self.apply_block(Namespace::Settings, fields, page),
            StateChange::Power(state) => set_toggle(controls, DeviceKey::Power, state.is_on()),
            StateChange::Gamma(enabled) => set_toggle(controls, DeviceKey::Gamma, *enabled),
            StateChange::Brightness(value) => set_range(controls, DeviceKey::Brightness, *value),
            StateChange::ColorTemp(value) => set_range(controls, DeviceKey::ColorTemp, *value),
            StateChange::WhiteValue(value) => set_range(controls, DeviceKey::WhiteValue, *value),
            StateChange::Color(color) => {
                set_range(controls, DeviceKey::Red, u16::from(color.red()));
                set_range(controls, DeviceKey::Green, u16::from(color.green()));
                set_range(controls, DeviceKey::Blue, u16::from(color.blue()));
            }
        }
    }

    fn apply_block(&mut self, namespace: Namespace, fields: &Fields, page: &mut impl Page) {
        let title_field = match namespace {
            Namespace::DeviceInfo => APP_NAME_FIELD,
            Namespace::Settings => HOSTNAME_FIELD,
        };
        if let Some(part) = fields.get(title_field) {
            match namespace {
                Namespace::DeviceInfo => self.app_name = Some(part.clone()),
                Namespace::Settings => self.hostname = Some(part.clone()),
            }
            if let Some(title) = self.title() {
                page.set_title(&title);
            }
        }

        for (key, text) in fields {
            page.set_display(key, text);
            if namespace.binds_form_inputs() && !page.set_form_input(key, text) {
                tracing::trace!(field = %key, "No form input for setting");
            }
        }
    }
}

fn set_toggle(controls: &mut Controls, key: DeviceKey, value: bool) {
    if let Some(control) = controls.toggle_mut(key) {
        control.set_value(value);
    }
}

fn set_range(controls: &mut Controls, key: DeviceKey, value: u16) {
    if let Some(control) = controls.range_mut(key) {
        control.set_value(value);
    }
}
