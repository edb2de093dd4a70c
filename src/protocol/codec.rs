// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON message codec.
//!
//! Every frame on the channel is one JSON object. Encoding never fails since
//! intents are built internally. Decoding is fail-soft: anything that is not
//! a JSON object yields `None` and must be ignored by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Intent;

/// A decoded message: the top-level key/value mapping of one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the top-level entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the payload into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // serde_json's Display for an object is infallible compact JSON
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

/// Serializes an intent into the text of one frame.
///
/// # Examples
///
/// ```
/// use rgbw_sync::protocol::{Intent, encode};
/// use rgbw_sync::types::DeviceCommand;
///
/// assert_eq!(encode(&Intent::Command(DeviceCommand::Reset)), r#"{"command":"reset"}"#);
/// ```
#[must_use]
pub fn encode(intent: &Intent) -> String {
    intent.to_payload().to_string()
}

/// Parses the text of one frame.
///
/// Returns `None` if the text is not valid JSON or is valid JSON but not an
/// object. A `None` result means "ignore this message".
///
/// # Examples
///
/// ```
/// use rgbw_sync::protocol::decode;
///
/// let payload = decode(r#"{"state":"OFF"}"#).unwrap();
/// assert!(payload.contains_key("state"));
///
/// assert!(decode("{not json").is_none());
/// assert!(decode("[1, 2, 3]").is_none());
/// ```
#[must_use]
pub fn decode(raw: &str) -> Option<Payload> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(Payload(map)),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "Ignoring non-object message");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed message");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
