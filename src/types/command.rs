// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maintenance commands understood by the firmware.

use std::fmt;

/// A maintenance command sent as `{"command": "<name>"}`.
///
/// Both commands make the device drop its WebSocket, so the client waits a
/// fixed delay and then reloads.
///
/// # Examples
///
/// ```
/// use rgbw_sync::types::DeviceCommand;
///
/// assert_eq!(DeviceCommand::Restart.as_str(), "restart");
/// assert_eq!(DeviceCommand::Reset.to_string(), "reset");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCommand {
    /// Reboot the device.
    Restart,
    /// Restore factory defaults and reboot.
    Reset,
}

impl DeviceCommand {
    /// Returns the wire name of the command.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Reset => "reset",
        }
    }

    /// Returns the question the user must confirm before the command is sent.
    #[must_use]
    pub const fn confirmation(&self) -> &'static str {
        match self {
            Self::Restart => "Are you sure you want to restart your device?",
            Self::Reset => {
                "You are about to reset your device to the factory defaults!\n Are you sure you want to reset?"
            }
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names() {
        assert_eq!(DeviceCommand::Restart.to_string(), "restart");
        assert_eq!(DeviceCommand::Reset.to_string(), "reset");
    }

    #[test]
    fn reset_confirmation_warns_about_defaults() {
        assert!(DeviceCommand::Reset.confirmation().contains("factory defaults"));
        assert!(DeviceCommand::Restart.confirmation().contains("restart"));
    }
}
