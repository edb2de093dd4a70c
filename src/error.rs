// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `rgbw_sync` library.
//!
//! This module provides the error hierarchy used across the library: value
//! validation, channel communication, incoming update parsing and settings
//! form validation.
//!
//! Most of these errors never reach the user. Transport failures surface as
//! channel lifecycle events, malformed updates are dropped by the dispatcher,
//! and sends on a closed channel are silently discarded. Only
//! [`ValidationError`] is meant to be shown next to a form field.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during channel communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while interpreting an incoming update.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The settings form did not pass validation.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A range was declared with `min` above `max`.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvertedRange {
        /// Declared minimum.
        min: u16,
        /// Declared maximum.
        max: u16,
    },

    /// A key was bound to a control of the wrong kind.
    #[error("key {key} cannot be bound to a {kind} control")]
    WrongControlKind {
        /// Wire name of the key.
        key: &'static str,
        /// Kind of control it was bound to.
        kind: &'static str,
    },
}

/// Errors related to the WebSocket channel.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The channel is not open.
    #[error("channel is not open")]
    NotOpen,

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to interpreting incoming updates.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected message format.
    #[error("unexpected message format: {0}")]
    UnexpectedFormat(String),
}

/// Reasons a settings field can be rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The hostname does not follow RFC 952.
    #[error("This hostname is invalid.")]
    InvalidHostname,

    /// The WiFi passphrase is too short.
    #[error("A WiFi Passphrase Key (Password) must be between 8 and 63 characters.")]
    PassphraseTooShort,
}

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Identifier of the offending input, as it appears in the form.
    pub input_id: String,
    /// Why the value was rejected.
    pub error: ValidationError,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.input_id, self.error)
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvertedRange { min: 255, max: 0 };
        assert_eq!(
            err.to_string(),
            "invalid range: min 255 is greater than max 0"
        );
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::WrongControlKind {
            key: "state",
            kind: "range",
        };
        let err: Error = value_err.into();
        assert!(matches!(
            err,
            Error::Value(ValueError::WrongControlKind { key: "state", .. })
        ));
    }

    #[test]
    fn validation_messages_match_form_text() {
        assert_eq!(
            ValidationError::InvalidHostname.to_string(),
            "This hostname is invalid."
        );
        assert_eq!(
            ValidationError::PassphraseTooShort.to_string(),
            "A WiFi Passphrase Key (Password) must be between 8 and 63 characters."
        );
    }

    #[test]
    fn validation_error_counts_fields() {
        let err = Error::Validation(vec![
            FieldError {
                input_id: "hostname".to_string(),
                error: ValidationError::InvalidHostname,
            },
            FieldError {
                input_id: "wifi.wifi_psk".to_string(),
                error: ValidationError::PassphraseTooShort,
            },
        ]);
        assert_eq!(err.to_string(), "validation failed for 2 field(s)");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::UnexpectedFormat("top level is an array".to_string());
        assert_eq!(
            err.to_string(),
            "unexpected message format: top level is an array"
        );
    }
}
