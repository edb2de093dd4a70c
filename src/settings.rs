// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings form collection and validation.

use std::collections::BTreeMap;

use crate::dispatch::HOSTNAME_FIELD;
use crate::error::{FieldError, ValidationError};
use crate::page::FormInput;
use crate::protocol::Intent;

/// Field holding the WiFi passphrase.
pub const WIFI_PSK_FIELD: &str = "wifi_psk";

/// Minimum WiFi passphrase length, in UTF-16 code units.
pub const MIN_PSK_LEN: usize = 8;

/// Checks a hostname against RFC 952.
///
/// Every dot-separated label starts with a letter, ends with a letter or
/// digit, and holds only letters, digits and hyphens.
///
/// # Examples
///
/// ```
/// use rgbw_sync::settings::is_valid_hostname;
///
/// assert!(is_valid_hostname("rgbw-light.local"));
/// assert!(!is_valid_hostname("1light"));
/// assert!(!is_valid_hostname("light-"));
/// ```
#[must_use]
pub fn is_valid_hostname(hostname: &str) -> bool {
    hostname.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    first.is_ascii_alphabetic()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// Validates a single form field.
///
/// Fields without a rule always pass.
///
/// # Errors
///
/// Returns the reason the value was rejected.
pub fn validate_field(field: &str, value: &str) -> Result<(), ValidationError> {
    match field {
        HOSTNAME_FIELD if !is_valid_hostname(value) => {
            Err(ValidationError::InvalidHostname)
        }
        WIFI_PSK_FIELD if value.encode_utf16().count() < MIN_PSK_LEN => {
            Err(ValidationError::PassphraseTooShort)
        }
        _ => Ok(()),
    }
}

/// Collects the settings form into a save intent.
///
/// Input identifiers may be dotted; only the last segment is sent. Every
/// input is checked so that all failures can be shown at once.
///
/// # Errors
///
/// Returns one [`FieldError`] per rejected input. Nothing should be sent
/// in that case.
pub fn collect_settings(inputs: &[FormInput]) -> Result<Intent, Vec<FieldError>> {
    let mut fields = BTreeMap::new();
    let mut errors = Vec::new();

    for input in inputs {
        let field = input.field();
        match validate_field(field, &input.value) {
            Ok(()) => {
                fields.insert(field.to_string(), input.value.clone());
            }
            Err(error) => errors.push(FieldError {
                input_id: input.id.clone(),
                error,
            }),
        }
    }

    if errors.is_empty() {
        Ok(Intent::Settings(fields))
    } else {
        tracing::debug!(count = errors.len(), "Settings rejected");
        Err(errors)
    }
}
