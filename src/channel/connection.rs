// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Socket task serving one channel.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::event::TaggedEvent;
use super::{ChannelEvent, ChannelId, ChannelState};

/// How the read loop ended.
enum Ended {
    Cancelled,
    Closed(String),
    Failed(String),
}

/// Everything the socket task needs, moved into it on spawn.
pub(crate) struct Connection {
    pub(crate) id: ChannelId,
    pub(crate) url: Url,
    pub(crate) state: Arc<RwLock<ChannelState>>,
    pub(crate) outgoing: mpsc::UnboundedReceiver<String>,
    pub(crate) events: mpsc::UnboundedSender<TaggedEvent>,
    pub(crate) cancel: CancellationToken,
}

impl Connection {
    fn emit(&self, event: ChannelEvent) {
        // The manager may already be gone
        let _ = self.events.send(TaggedEvent {
            channel: self.id,
            event,
        });
    }

    fn set_state(&self, state: ChannelState) {
        *self.state.write() = state;
    }

    fn fail(&self, detail: String) {
        tracing::warn!(channel = %self.id, url = %self.url, error = %detail, "Channel failed");
        self.set_state(ChannelState::Errored);
        self.emit(ChannelEvent::Error {
            detail: detail.clone(),
        });
        self.emit(ChannelEvent::Closed { reason: detail });
    }

    /// Connects, then pumps frames in both directions until the channel
    /// ends or is cancelled.
    pub(crate) async fn run(mut self) {
        tracing::info!(channel = %self.id, url = %self.url, "Connecting to device");

        let connected = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return,
            result = tokio_tungstenite::connect_async(self.url.as_str()) => result,
        };
        let ws_stream = match connected {
            Ok((ws_stream, _response)) => ws_stream,
            Err(e) => {
                self.fail(e.to_string());
                return;
            }
        };

        self.set_state(ChannelState::Open);
        tracing::info!(channel = %self.id, url = %self.url, "Channel open");
        self.emit(ChannelEvent::Open);

        let (mut write, mut read) = ws_stream.split();

        let ended = loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    let _ = write.send(Message::Close(None)).await;
                    break Ended::Cancelled;
                }
                Some(payload) = self.outgoing.recv() => {
                    tracing::debug!(channel = %self.id, payload = %payload, "Sending frame");
                    if let Err(e) = write.send(Message::text(payload)).await {
                        break Ended::Failed(e.to_string());
                    }
                }
                frame = read.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            tracing::debug!(channel = %self.id, len = text.len(), "Frame received");
                            self.emit(ChannelEvent::Message(text.as_str().to_owned()));
                        }
                        Some(Ok(Message::Ping(_))) => {
                            // tungstenite answers pings itself
                            tracing::trace!(channel = %self.id, "Ping");
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let reason = frame.map(|cf| {
                                tracing::info!(code = %cf.code, reason = %cf.reason, "Close frame received");
                                cf.reason.as_str().to_owned()
                            });
                            break Ended::Closed(reason.unwrap_or_default());
                        }
                        Some(Err(e)) => break Ended::Failed(e.to_string()),
                        None => break Ended::Closed(String::new()),
                        Some(Ok(_)) => {
                            // Binary, pong and raw frames carry no state
                        }
                    }
                }
            }
        };

        match ended {
            Ended::Cancelled => {
                tracing::debug!(channel = %self.id, "Channel task cancelled");
            }
            Ended::Closed(reason) => {
                tracing::info!(channel = %self.id, url = %self.url, reason = %reason, "Channel closed");
                self.set_state(ChannelState::Closed);
                self.emit(ChannelEvent::Closed { reason });
            }
            Ended::Failed(detail) => self.fail(detail),
        }
    }
}
