// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for incoming state updates.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::protocol::Payload;
use crate::state::{Fields, StateChange};
use crate::types::{PowerState, RgbColor};

/// Typed view of an incoming update.
///
/// Every field is optional since the device pushes any subset of its state.
/// Unknown keys are ignored.
///
/// # Examples
///
/// ```
/// use rgbw_sync::update::IncomingUpdate;
/// use rgbw_sync::types::PowerState;
///
/// let json = r#"{"state":"ON","brightness":75,"color_temp":326}"#;
/// let update: IncomingUpdate = serde_json::from_str(json).unwrap();
///
/// assert_eq!(update.power(), Some(PowerState::On));
/// assert_eq!(update.brightness(), Some(75));
/// assert_eq!(update.color_temp(), Some(326));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingUpdate {
    /// Device information block.
    #[serde(rename = "d", default)]
    device_info: Option<Map<String, Value>>,

    /// Settings block.
    #[serde(rename = "s", default)]
    settings: Option<Map<String, Value>>,

    /// Power state; only `"OFF"` means off.
    #[serde(rename = "state", default, deserialize_with = "present")]
    state: Option<Value>,

    /// Brightness level.
    #[serde(default, deserialize_with = "level")]
    brightness: Option<u16>,

    /// Color temperature in mireds.
    #[serde(default, deserialize_with = "level")]
    color_temp: Option<u16>,

    /// RGB color.
    #[serde(default, deserialize_with = "color")]
    color: Option<RgbColor>,

    /// White channel level.
    #[serde(default, deserialize_with = "level")]
    white_value: Option<u16>,

    /// Gamma correction flag.
    #[serde(default)]
    gamma: Option<bool>,
}

impl IncomingUpdate {
    /// Interprets a decoded payload.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if any known key carries a value of the
    /// wrong type. The whole update is rejected in that case.
    pub fn from_payload(payload: &Payload) -> Result<Self, ParseError> {
        serde_json::from_value(payload.clone().into_value()).map_err(ParseError::Json)
    }

    /// Returns the reported power state.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.state.as_ref().map(|value| match value {
            Value::String(s) => PowerState::from_reported(s),
            _ => PowerState::On,
        })
    }

    /// Returns the brightness level.
    #[must_use]
    pub fn brightness(&self) -> Option<u16> {
        self.brightness
    }

    /// Returns the color temperature in mireds.
    #[must_use]
    pub fn color_temp(&self) -> Option<u16> {
        self.color_temp
    }

    /// Returns the RGB color.
    #[must_use]
    pub fn color(&self) -> Option<RgbColor> {
        self.color
    }

    /// Returns the white channel level.
    #[must_use]
    pub fn white_value(&self) -> Option<u16> {
        self.white_value
    }

    /// Returns the gamma correction flag.
    #[must_use]
    pub fn gamma(&self) -> Option<bool> {
        self.gamma
    }

    /// Returns the device information block as display text.
    #[must_use]
    pub fn device_info(&self) -> Option<Fields> {
        self.device_info.as_ref().map(display_fields)
    }

    /// Returns the settings block as display text.
    #[must_use]
    pub fn settings(&self) -> Option<Fields> {
        self.settings.as_ref().map(display_fields)
    }

    /// Converts the update into a list of state changes.
    ///
    /// Namespace blocks come first so the page title is set before any
    /// control re-renders.
    #[must_use]
    pub fn to_state_changes(&self) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if let Some(fields) = self.device_info() {
            changes.push(StateChange::DeviceInfo(fields));
        }
        if let Some(fields) = self.settings() {
            changes.push(StateChange::Settings(fields));
        }
        if let Some(power) = self.power() {
            changes.push(StateChange::Power(power));
        }
        if let Some(value) = self.brightness {
            changes.push(StateChange::Brightness(value));
        }
        if let Some(value) = self.color_temp {
            changes.push(StateChange::ColorTemp(value));
        }
        if let Some(color) = self.color {
            changes.push(StateChange::Color(color));
        }
        if let Some(value) = self.white_value {
            changes.push(StateChange::WhiteValue(value));
        }
        if let Some(enabled) = self.gamma {
            changes.push(StateChange::Gamma(enabled));
        }

        changes
    }
}

/// Parses a decoded payload straight into state changes.
///
/// # Errors
///
/// Returns `ParseError` if a known key has an unusable value.
pub fn parse_update(payload: &Payload) -> Result<Vec<StateChange>, ParseError> {
    IncomingUpdate::from_payload(payload).map(|update| update.to_state_changes())
}

/// Renders namespace values the way they are shown on the page.
fn display_fields(map: &Map<String, Value>) -> Fields {
    map.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

/// Keeps an explicit `null` as a present value.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A numeric level as sent by the firmware: a number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl RawLevel {
    fn to_u16(&self) -> Result<u16, String> {
        match self {
            Self::Integer(n) => u16::try_from(*n).map_err(|_| format!("{n} is too large")),
            Self::Float(f) => float_level(*f),
            Self::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<u64>() {
                    return Self::Integer(n).to_u16();
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| format!("{s:?} is not a number"))
                    .and_then(float_level)
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_level(f: f64) -> Result<u16, String> {
    let rounded = f.round();
    if rounded.is_finite() && (0.0..=f64::from(u16::MAX)).contains(&rounded) {
        // Safe: range checked above
        Ok(rounded as u16)
    } else {
        Err(format!("{f} is not a valid level"))
    }
}

fn level<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawLevel::deserialize(deserializer)?;
    raw.to_u16().map(Some).map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
struct RawColor {
    r: RawLevel,
    g: RawLevel,
    b: RawLevel,
}

fn color<'de, D>(deserializer: D) -> Result<Option<RgbColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawColor::deserialize(deserializer)?;
    let channel = |level: &RawLevel, name: &str| {
        let value = level.to_u16().map_err(serde::de::Error::custom)?;
        u8::try_from(value)
            .map_err(|_| serde::de::Error::custom(format!("channel {name}: {value} exceeds 255")))
    };
    Ok(Some(RgbColor::new(
        channel(&raw.r, "r")?,
        channel(&raw.g, "g")?,
        channel(&raw.b, "b")?,
    )))
}
