// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::ProtocolError;

/// Default HTTP port of the device.
pub const DEFAULT_PORT: u16 = 80;

/// Default WebSocket path on the device.
pub const DEFAULT_PATH: &str = "/ws";

/// Delay between a restart or reset command and the reconnect.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_secs(10);

/// Where and how to reach a device.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rgbw_sync::config::SessionConfig;
///
/// let config = SessionConfig::new("192.168.1.40")
///     .with_port(8080)
///     .with_reload_delay(Duration::from_secs(5));
///
/// assert_eq!(config.endpoint().unwrap().as_str(), "ws://192.168.1.40:8080/ws");
/// ```
///
/// Also deserializes, with every field but `host` optional:
///
/// ```
/// use rgbw_sync::config::SessionConfig;
///
/// let config: SessionConfig =
///     serde_json::from_str(r#"{"host":"light.local","reload_delay":3}"#).unwrap();
/// assert_eq!(config.port, 80);
/// assert_eq!(config.reload_delay.as_secs(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Device host name or IP address.
    pub host: String,
    /// Device port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// WebSocket path.
    #[serde(default = "default_path")]
    pub path: String,
    /// Delay before reconnecting after a restart or reset, in seconds.
    #[serde(default = "default_reload_delay", deserialize_with = "seconds")]
    pub reload_delay: Duration,
}

impl SessionConfig {
    /// Creates a configuration with default port, path and reload delay.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            reload_delay: DEFAULT_RELOAD_DELAY,
        }
    }

    /// Sets the device port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the WebSocket path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the reconnect delay after a restart or reset.
    #[must_use]
    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    /// Builds the WebSocket endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the host or path cannot
    /// form a valid URL.
    pub fn endpoint(&self) -> Result<Url, ProtocolError> {
        if self.host.is_empty() {
            return Err(ProtocolError::InvalidAddress("empty host".to_string()));
        }
        let path = self.path.trim_start_matches('/');
        let raw = format!("ws://{}:{}/{path}", self.host, self.port);
        let url = Url::parse(&raw).map_err(|e| ProtocolError::InvalidAddress(format!("{raw}: {e}")))?;
        if url.host_str().is_none() {
            return Err(ProtocolError::InvalidAddress(raw));
        }
        Ok(url)
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_reload_delay() -> Duration {
    DEFAULT_RELOAD_DELAY
}

fn seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
