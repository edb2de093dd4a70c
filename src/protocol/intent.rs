// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outgoing intents.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::types::{DeviceCommand, DeviceKey, Namespace, PowerState, RgbColor};

use super::Payload;

/// Key of the maintenance command field.
pub const COMMAND_KEY: &str = "command";

/// A user-requested change, built from one interaction and sent once.
///
/// Level and color changes imply that the light should be on, so their
/// payloads always carry `"state": "ON"` as well.
///
/// # Examples
///
/// ```
/// use rgbw_sync::protocol::Intent;
///
/// let intent = Intent::Brightness(80);
/// assert_eq!(
///     intent.to_payload().to_string(),
///     r#"{"brightness":80,"state":"ON"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Switch the light on or off.
    Power(PowerState),
    /// Set the brightness level.
    Brightness(u16),
    /// Set the color temperature in mireds.
    ColorTemp(u16),
    /// Set all three color channels at once.
    Color(RgbColor),
    /// Set the white channel level.
    WhiteValue(u16),
    /// Enable or disable gamma correction.
    Gamma(bool),
    /// Restart or reset the device.
    Command(DeviceCommand),
    /// Save settings, keyed by form field identifier.
    Settings(BTreeMap<String, String>),
}

impl Intent {
    /// Builds the intent a single-value range control emits on commit.
    ///
    /// Returns `None` for toggle keys and for the RGB channels, which are
    /// only ever sent together as [`Intent::Color`].
    #[must_use]
    pub fn level(key: DeviceKey, value: u16) -> Option<Self> {
        match key {
            DeviceKey::Brightness => Some(Self::Brightness(value)),
            DeviceKey::ColorTemp => Some(Self::ColorTemp(value)),
            DeviceKey::WhiteValue => Some(Self::WhiteValue(value)),
            _ => None,
        }
    }

    /// Returns `true` if the payload also switches the light on.
    #[must_use]
    pub const fn implies_power_on(&self) -> bool {
        matches!(
            self,
            Self::Brightness(_) | Self::ColorTemp(_) | Self::Color(_) | Self::WhiteValue(_)
        )
    }

    /// Builds the key/value structure sent on the wire.
    #[must_use]
    pub fn to_payload(&self) -> Payload {
        let mut map = Map::new();
        match self {
            Self::Power(state) => {
                map.insert(DeviceKey::Power.as_str().into(), json!(state.as_str()));
            }
            Self::Brightness(value) => {
                map.insert(DeviceKey::Brightness.as_str().into(), json!(value));
            }
            Self::ColorTemp(value) => {
                map.insert(DeviceKey::ColorTemp.as_str().into(), json!(value));
            }
            Self::Color(color) => {
                map.insert(DeviceKey::COLOR.into(), json!(color));
            }
            Self::WhiteValue(value) => {
                map.insert(DeviceKey::WhiteValue.as_str().into(), json!(value));
            }
            Self::Gamma(enabled) => {
                map.insert(DeviceKey::Gamma.as_str().into(), Value::Bool(*enabled));
            }
            Self::Command(command) => {
                map.insert(COMMAND_KEY.into(), json!(command.as_str()));
            }
            Self::Settings(fields) => {
                map.insert(Namespace::Settings.as_str().into(), json!(fields));
            }
        }
        if self.implies_power_on() {
            map.insert(
                DeviceKey::Power.as_str().into(),
                json!(PowerState::On.as_str()),
            );
        }
        Payload::from(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_intent_uses_on_off_strings() {
        assert_eq!(
            Intent::Power(PowerState::Off).to_payload().to_string(),
            r#"{"state":"OFF"}"#
        );
    }

    #[test]
    fn gamma_intent_sends_raw_boolean() {
        let payload = Intent::Gamma(false).to_payload();
        assert_eq!(payload.to_string(), r#"{"gamma":false}"#);
    }

    #[test]
    fn level_intents_switch_the_light_on() {
        for key in [DeviceKey::Brightness, DeviceKey::ColorTemp, DeviceKey::WhiteValue] {
            let payload = Intent::level(key, 200).unwrap().to_payload();
            assert_eq!(payload.get(key.as_str()), Some(&json!(200)));
            assert_eq!(payload.get("state"), Some(&json!("ON")));
            assert_eq!(payload.len(), 2);
        }
    }

    #[test]
    fn level_rejects_rgb_and_toggle_keys() {
        assert_eq!(Intent::level(DeviceKey::Red, 1), None);
        assert_eq!(Intent::level(DeviceKey::Gamma, 1), None);
    }

    #[test]
    fn color_intent_is_composite() {
        let payload = Intent::Color(RgbColor::new(1, 2, 3)).to_payload();
        assert_eq!(payload.get("color"), Some(&json!({"r": 1, "g": 2, "b": 3})));
        assert_eq!(payload.get("state"), Some(&json!("ON")));
    }

    #[test]
    fn command_and_settings_do_not_touch_power() {
        let restart = Intent::Command(DeviceCommand::Restart).to_payload();
        assert_eq!(restart.to_string(), r#"{"command":"restart"}"#);

        let mut fields = BTreeMap::new();
        fields.insert("hostname".to_string(), "rgbw-light".to_string());
        let save = Intent::Settings(fields).to_payload();
        assert_eq!(save.to_string(), r#"{"s":{"hostname":"rgbw-light"}}"#);
    }
}
