// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ownership of the single live channel.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::SessionConfig;
use crate::error::ProtocolError;
use crate::protocol::IntentSink;

use super::connection::Connection;
use super::event::TaggedEvent;
use super::{ChannelEvent, ChannelId, ChannelState};

/// Handles of the channel currently owned by the manager.
struct LiveChannel {
    id: ChannelId,
    state: Arc<RwLock<ChannelState>>,
    outgoing: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
}

/// Owns at most one WebSocket channel to the device.
///
/// Connecting replaces the previous channel. Events from replaced channels
/// are discarded by [`next_event`](Self::next_event). Sends while the
/// channel is not open are dropped, never queued.
///
/// # Examples
///
/// ```no_run
/// use rgbw_sync::channel::{ChannelEvent, ChannelManager};
///
/// # async fn example() -> rgbw_sync::Result<()> {
/// let mut channel = ChannelManager::new();
/// channel.connect("192.168.1.40", 80)?;
///
/// loop {
///     match channel.next_event().await {
///         ChannelEvent::Message(raw) => println!("{raw}"),
///         ChannelEvent::Closed { .. } => break,
///         _ => {}
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChannelManager {
    live: Option<LiveChannel>,
    last_state: ChannelState,
    events_tx: mpsc::UnboundedSender<TaggedEvent>,
    events_rx: mpsc::UnboundedReceiver<TaggedEvent>,
}

impl ChannelManager {
    /// Creates a manager with no channel.
    #[must_use]
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            live: None,
            last_state: ChannelState::Disconnected,
            events_tx,
            events_rx,
        }
    }

    /// Opens a channel to `ws://host:port/ws`, closing any existing one.
    ///
    /// Must be called within a Tokio runtime. The outcome is reported
    /// through [`next_event`](Self::next_event).
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if no valid URL can be built
    /// from `host` and `port`.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<ChannelId, ProtocolError> {
        let url = SessionConfig::new(host).with_port(port).endpoint()?;
        Ok(self.connect_url(url))
    }

    /// Opens a channel to the endpoint of `config`, closing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the endpoint is invalid.
    pub fn connect_to(&mut self, config: &SessionConfig) -> Result<ChannelId, ProtocolError> {
        let url = config.endpoint()?;
        Ok(self.connect_url(url))
    }

    /// Opens a channel to `url`, closing any existing one.
    pub fn connect_url(&mut self, url: Url) -> ChannelId {
        self.close();

        let id = ChannelId::new();
        let state = Arc::new(RwLock::new(ChannelState::Connecting));
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let connection = Connection {
            id,
            url,
            state: Arc::clone(&state),
            outgoing: outgoing_rx,
            events: self.events_tx.clone(),
            cancel: cancel.clone(),
        };
        tokio::spawn(connection.run());

        self.live = Some(LiveChannel {
            id,
            state,
            outgoing: outgoing_tx,
            cancel,
        });
        id
    }

    /// Closes the live channel, if any. Pending sends are dropped.
    pub fn close(&mut self) {
        if let Some(live) = self.live.take() {
            tracing::info!(channel = %live.id, "Closing channel");
            live.cancel.cancel();
            self.last_state = ChannelState::Closed;
        }
    }

    /// Returns the identifier of the live channel.
    #[must_use]
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.live.as_ref().map(|live| live.id)
    }

    /// Returns the state of the live channel.
    #[must_use]
    pub fn state(&self) -> ChannelState {
        self.live
            .as_ref()
            .map_or(self.last_state, |live| *live.state.read())
    }

    /// Returns `true` if payloads can be sent.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Sends a text payload verbatim.
    ///
    /// Returns `false` and drops the payload if the channel is not open.
    pub fn send(&self, payload: &str) -> bool {
        let Some(live) = self.live.as_ref().filter(|live| live.state.read().is_open()) else {
            tracing::debug!(state = %self.state(), payload = %payload, "Channel not open, dropping payload");
            return false;
        };
        live.outgoing.send(payload.to_owned()).is_ok()
    }

    /// Waits for the next event of the live channel.
    ///
    /// Events from replaced or closed channels are skipped. Pends forever
    /// while no channel is live.
    pub async fn next_event(&mut self) -> ChannelEvent {
        loop {
            let Some(tagged) = self.events_rx.recv().await else {
                // The manager holds a sender, so the queue never closes
                return std::future::pending().await;
            };
            if self.channel_id() == Some(tagged.channel) {
                return tagged.event;
            }
            tracing::trace!(channel = %tagged.channel, "Discarding event from stale channel");
        }
    }

    /// Like [`send`](Self::send), but fails with an error instead of
    /// returning `false`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::NotOpen` if the channel is not open, or
    /// `ProtocolError::ChannelClosed` if its task has already stopped.
    pub fn try_send(&self, payload: &str) -> Result<(), ProtocolError> {
        let live = self
            .live
            .as_ref()
            .filter(|live| live.state.read().is_open())
            .ok_or(ProtocolError::NotOpen)?;
        live.outgoing
            .send(payload.to_owned())
            .map_err(|_| ProtocolError::ChannelClosed(live.id.to_string()))
    }
}

impl Default for ChannelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ChannelManager {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            live.cancel.cancel();
        }
    }
}

impl std::fmt::Debug for ChannelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelManager")
            .field("channel", &self.channel_id())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl IntentSink for ChannelManager {
    fn send_text(&mut self, payload: &str) -> bool {
        self.send(payload)
    }
}
