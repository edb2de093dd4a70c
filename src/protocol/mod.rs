// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire protocol between the control surface and the light.
//!
//! - [`Intent`]: an outgoing, user-requested change
//! - [`Payload`]: the decoded key/value mapping of one frame
//! - [`encode`] / [`decode`]: the JSON codec
//! - [`IntentSink`]: anything that can carry an encoded intent to the device

mod codec;
mod intent;

pub use codec::{Payload, decode, encode};
pub use intent::{COMMAND_KEY, Intent};

/// Destination for encoded intents.
///
/// Delivery is fire-and-forget: implementations drop the payload when they
/// cannot send it and report that through the return value. No error is
/// surfaced and nothing is queued for later.
pub trait IntentSink {
    /// Transmits one encoded frame verbatim.
    ///
    /// Returns `true` if the payload was handed to the transport.
    fn send_text(&mut self, payload: &str) -> bool;

    /// Encodes and transmits an intent.
    fn send_intent(&mut self, intent: &Intent) -> bool {
        let payload = encode(intent);
        tracing::debug!(payload = %payload, "Sending intent");
        self.send_text(&payload)
    }
}

impl IntentSink for Vec<String> {
    fn send_text(&mut self, payload: &str) -> bool {
        self.push(payload.to_string());
        true
    }
}
