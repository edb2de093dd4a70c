// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The host page around the controls.

use crate::error::FieldError;

/// One input of the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    /// Element identifier, possibly dotted (`wifi.wifi_psk`).
    pub id: String,
    /// Current text of the input.
    pub value: String,
}

impl FormInput {
    /// Creates a form input.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Returns the field name sent to the device: the last dotted segment.
    #[must_use]
    pub fn field(&self) -> &str {
        self.id.rsplit('.').next().unwrap_or(&self.id)
    }
}

/// Passive page elements updated from device state.
///
/// Implemented by the rendering front end. All methods are fire-and-forget.
pub trait Page: Send {
    /// Replaces the document title.
    fn set_title(&mut self, title: &str);

    /// Updates every display element tagged with `tag`.
    fn set_display(&mut self, tag: &str, text: &str);

    /// Sets the value of the form input with identifier `id`.
    ///
    /// Returns `false` if the page has no such input.
    fn set_form_input(&mut self, id: &str, value: &str) -> bool;

    /// Returns the inputs of the settings form in document order.
    fn form_inputs(&self) -> Vec<FormInput> {
        Vec::new()
    }

    /// Replaces the validation messages shown next to the form inputs.
    ///
    /// An empty slice clears all messages.
    fn show_validation(&mut self, errors: &[FieldError]) {
        let _ = errors;
    }
}
