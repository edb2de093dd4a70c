// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A running connection between one control surface and one device.
//!
//! [`Session`] owns the [`ChannelManager`] and the [`ControlSurface`] and
//! processes one event at a time: channel lifecycle events, incoming
//! frames and the reconnect timer started by a restart or reset.

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::channel::{ChannelEvent, ChannelId, ChannelManager, ChannelState};
use crate::config::SessionConfig;
use crate::error::{Error, ProtocolError};
use crate::page::Page;
use crate::protocol::{Intent, IntentSink};
use crate::surface::ControlSurface;
use crate::types::{DeviceCommand, DeviceKey};

/// Asks the user to confirm a destructive action.
pub trait Prompt {
    /// Shows `message` and returns `true` if the user agrees.
    fn confirm(&mut self, message: &str) -> bool;
}

/// What one [`Session::step`] observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The channel opened.
    Connected,
    /// The channel closed.
    Disconnected {
        /// Reason given by the peer or the failure description.
        reason: String,
    },
    /// The channel failed.
    Failed {
        /// What went wrong.
        detail: String,
    },
    /// A frame arrived and this many state changes were applied.
    ///
    /// Zero means the frame was dropped or carried no known keys.
    Updated(usize),
    /// The post-command delay elapsed and the channel was reopened.
    Reloaded(ChannelId),
}

/// Channel, controls and page driven by a single event loop.
#[derive(Debug)]
pub struct Session<P> {
    config: SessionConfig,
    channel: ChannelManager,
    surface: ControlSurface<P>,
    reload_at: Option<Instant>,
}

impl<P: Page> Session<P> {
    /// Creates a session. No connection is made until [`start`](Self::start).
    #[must_use]
    pub fn new(config: SessionConfig, surface: ControlSurface<P>) -> Self {
        Self {
            config,
            channel: ChannelManager::new(),
            surface,
            reload_at: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the control surface.
    #[must_use]
    pub fn surface(&self) -> &ControlSurface<P> {
        &self.surface
    }

    /// Returns the control surface for mutation.
    pub fn surface_mut(&mut self) -> &mut ControlSurface<P> {
        &mut self.surface
    }

    /// Returns the channel state.
    #[must_use]
    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    /// Returns the identifier of the live channel.
    #[must_use]
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.channel.channel_id()
    }

    /// Returns `true` while a restart or reset reconnect is pending.
    #[must_use]
    pub fn reload_pending(&self) -> bool {
        self.reload_at.is_some()
    }

    /// Opens the channel, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the configured endpoint
    /// is invalid.
    pub fn start(&mut self) -> Result<ChannelId, ProtocolError> {
        self.channel.connect_to(&self.config)
    }

    /// Closes the channel.
    pub fn stop(&mut self) {
        self.channel.close();
    }

    /// Flips a toggle and sends the result.
    pub fn toggle(&mut self, key: DeviceKey) -> bool {
        self.surface.toggle(key, &mut self.channel)
    }

    /// Moves a slider without sending.
    pub fn slide(&mut self, key: DeviceKey, value: u16) {
        self.surface.slide(key, value);
    }

    /// Releases a slider and sends the result.
    pub fn commit(&mut self, key: DeviceKey, value: u16) -> bool {
        self.surface.commit(key, value, &mut self.channel)
    }

    /// Validates and sends the settings form.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` with the rejected fields. Nothing is
    /// sent in that case.
    pub fn save_settings(&mut self) -> crate::Result<bool> {
        self.surface
            .save_settings(&mut self.channel)
            .map_err(Error::Validation)
    }

    /// Asks for confirmation, sends `command` and schedules a reconnect.
    ///
    /// The reconnect happens [`reload_delay`](SessionConfig::reload_delay)
    /// later and cannot be cancelled. Returns `false` if the user declined.
    pub fn request_command(&mut self, command: DeviceCommand, prompt: &mut impl Prompt) -> bool {
        if !prompt.confirm(command.confirmation()) {
            tracing::debug!(command = %command, "Command declined");
            return false;
        }
        tracing::info!(command = %command, "Sending device command");
        if !self.channel.send_intent(&Intent::Command(command)) {
            tracing::debug!(command = %command, "Command dropped, channel not open");
        }

        let at = Instant::now() + self.config.reload_delay;
        if self.reload_at.is_none_or(|pending| at < pending) {
            self.reload_at = Some(at);
        }
        true
    }

    /// Waits for and processes the next event.
    ///
    /// A reload reopens the channel and forgets the title parts. Control
    /// values stay until the device pushes its state again.
    pub async fn step(&mut self) -> SessionEvent {
        let reload_at = self.reload_at;
        tokio::select! {
            biased;
            () = reload_timer(reload_at) => {
                self.reload_at = None;
                self.surface.forget_device_info();
                tracing::info!(host = %self.config.host, "Reconnecting after device command");
                let id = match self.start() {
                    Ok(id) => id,
                    Err(e) => {
                        tracing::warn!(error = %e, "Reconnect failed");
                        return SessionEvent::Failed { detail: e.to_string() };
                    }
                };
                SessionEvent::Reloaded(id)
            }
            event = self.channel.next_event() => self.handle_channel_event(event),
        }
    }

    /// Processes events until `cancel` fires, then closes the channel.
    pub async fn run(&mut self, cancel: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                event = self.step() => tracing::trace!(?event, "Session step"),
            }
        }
        self.stop();
    }

    fn handle_channel_event(&mut self, event: ChannelEvent) -> SessionEvent {
        match event {
            ChannelEvent::Open => SessionEvent::Connected,
            ChannelEvent::Closed { reason } => SessionEvent::Disconnected { reason },
            ChannelEvent::Error { detail } => SessionEvent::Failed { detail },
            ChannelEvent::Message(raw) => SessionEvent::Updated(self.surface.handle_message(&raw)),
        }
    }
}

async fn reload_timer(at: Option<Instant>) {
    match at {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::control::{RangeView, RangeWidget, ToggleWidget, WidgetFactory};
    use crate::error::ValidationError;
    use crate::page::FormInput;

    struct Blank(Vec<FormInput>);

    struct Off;

    impl ToggleWidget for Off {
        fn is_checked(&self) -> bool {
            false
        }

        fn render(&mut self, _checked: bool) {}
    }

    struct Zero;

    impl RangeWidget for Zero {
        fn initial_value(&self) -> u16 {
            0
        }

        fn render(&mut self, _view: RangeView) {}
    }

    impl WidgetFactory for Blank {
        fn toggle_widget(&mut self, _key: DeviceKey) -> Box<dyn ToggleWidget> {
            Box::new(Off)
        }

        fn range_widget(&mut self, _key: DeviceKey) -> Box<dyn RangeWidget> {
            Box::new(Zero)
        }
    }

    impl Page for Blank {
        fn set_title(&mut self, _title: &str) {}

        fn set_display(&mut self, _tag: &str, _text: &str) {}

        fn set_form_input(&mut self, _id: &str, _value: &str) -> bool {
            false
        }

        fn form_inputs(&self) -> Vec<FormInput> {
            self.0.clone()
        }
    }

    struct Answer(bool, Vec<String>);

    impl Prompt for Answer {
        fn confirm(&mut self, message: &str) -> bool {
            self.1.push(message.to_string());
            self.0
        }
    }

    fn session() -> Session<Blank> {
        session_with_form(Vec::new())
    }

    fn session_with_form(inputs: Vec<FormInput>) -> Session<Blank> {
        let config = SessionConfig::new("127.0.0.1").with_port(9);
        Session::new(config, ControlSurface::bind(Blank(inputs)).unwrap())
    }

    #[test]
    fn declined_command_schedules_nothing() {
        let mut session = session();
        let mut prompt = Answer(false, Vec::new());
        assert!(!session.request_command(DeviceCommand::Reset, &mut prompt));
        assert!(!session.reload_pending());
        assert_eq!(prompt.1, vec![DeviceCommand::Reset.confirmation()]);
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_command_reconnects_after_delay() {
        let mut session = session();
        session
            .surface_mut()
            .handle_message(r#"{"d":{"app_name":"RGBW Light"},"brightness":90}"#);
        assert_eq!(session.surface().title().as_deref(), Some("RGBW Light"));

        let started = Instant::now();
        assert!(session.request_command(DeviceCommand::Restart, &mut Answer(true, Vec::new())));
        assert!(session.reload_pending());

        let event = session.step().await;
        assert!(matches!(event, SessionEvent::Reloaded(_)));
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert!(!session.reload_pending());
        assert!(session.channel_id().is_some());

        assert_eq!(session.surface().title(), None);
        assert_eq!(session.surface().snapshot().brightness, 90);
    }

    #[tokio::test(start_paused = true)]
    async fn run_closes_channel_when_cancelled() {
        let mut session = session();
        session.start().unwrap();
        assert!(session.channel_id().is_some());

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        session.run(cancel).await;

        assert_eq!(session.channel_state(), ChannelState::Closed);
        assert_eq!(session.channel_id(), None);
    }

    #[test]
    fn rejected_settings_become_validation_error() {
        let mut session = session_with_form(vec![FormInput::new("wifi.wifi_psk", "short")]);

        let Err(Error::Validation(errors)) = session.save_settings() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].input_id, "wifi.wifi_psk");
        assert_eq!(errors[0].error, ValidationError::PassphraseTooShort);
    }

    #[test]
    fn valid_settings_are_dropped_without_channel() {
        let mut session = session_with_form(vec![FormInput::new("general.hostname", "porch")]);
        assert!(!session.save_settings().unwrap());
    }

    #[test]
    fn interactions_without_channel_are_dropped() {
        let mut session = session();
        assert!(!session.toggle(DeviceKey::Power));
        assert!(!session.commit(DeviceKey::Brightness, 10));
        assert!(session.surface().snapshot().is_on());
    }
}
