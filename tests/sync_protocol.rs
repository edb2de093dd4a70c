// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for state synchronization between the device and the
//! control surface, using recording widgets and an in-memory sink.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use rgbw_sync::control::{RangeView, RangeWidget, ToggleWidget, WidgetFactory};
use rgbw_sync::page::{FormInput, Page};
use rgbw_sync::protocol::{Intent, decode, encode};
use rgbw_sync::types::{DeviceCommand, DeviceKey, Fill, PowerState, RangeBounds, RgbColor};
use rgbw_sync::{BoundControl, ControlSurface, FieldError, ValidationError};

/// Everything the widgets and the page were asked to show.
#[derive(Debug, Default)]
struct Screen {
    toggles: HashMap<DeviceKey, Vec<bool>>,
    ranges: HashMap<DeviceKey, Vec<RangeView>>,
    title: Option<String>,
    displays: BTreeMap<String, String>,
    inputs: BTreeMap<String, String>,
    validation: Vec<FieldError>,
}

type SharedScreen = Arc<Mutex<Screen>>;

struct RecordingToggle {
    key: DeviceKey,
    screen: SharedScreen,
}

impl ToggleWidget for RecordingToggle {
    fn is_checked(&self) -> bool {
        false
    }

    fn render(&mut self, checked: bool) {
        self.screen
            .lock()
            .toggles
            .entry(self.key)
            .or_default()
            .push(checked);
    }
}

struct RecordingRange {
    key: DeviceKey,
    bounds: Option<RangeBounds>,
    screen: SharedScreen,
}

impl RangeWidget for RecordingRange {
    fn bounds(&self, key: DeviceKey) -> RangeBounds {
        self.bounds.unwrap_or(RangeBounds::for_key(key))
    }

    fn initial_value(&self) -> u16 {
        0
    }

    fn render(&mut self, view: RangeView) {
        self.screen
            .lock()
            .ranges
            .entry(self.key)
            .or_default()
            .push(view);
    }
}

struct TestPage {
    screen: SharedScreen,
    bounds: HashMap<DeviceKey, RangeBounds>,
    form: Vec<FormInput>,
}

impl TestPage {
    fn new() -> Self {
        Self {
            screen: SharedScreen::default(),
            bounds: HashMap::new(),
            form: vec![
                FormInput::new("general.hostname", ""),
                FormInput::new("wifi.wifi_ssid", ""),
                FormInput::new("wifi.wifi_psk", ""),
            ],
        }
    }

    fn with_bounds(mut self, key: DeviceKey, bounds: RangeBounds) -> Self {
        self.bounds.insert(key, bounds);
        self
    }
}

impl WidgetFactory for TestPage {
    fn toggle_widget(&mut self, key: DeviceKey) -> Box<dyn ToggleWidget> {
        Box::new(RecordingToggle {
            key,
            screen: Arc::clone(&self.screen),
        })
    }

    fn range_widget(&mut self, key: DeviceKey) -> Box<dyn RangeWidget> {
        Box::new(RecordingRange {
            key,
            bounds: self.bounds.get(&key).copied(),
            screen: Arc::clone(&self.screen),
        })
    }
}

impl Page for TestPage {
    fn set_title(&mut self, title: &str) {
        self.screen.lock().title = Some(title.to_string());
    }

    fn set_display(&mut self, tag: &str, text: &str) {
        self.screen
            .lock()
            .displays
            .insert(tag.to_string(), text.to_string());
    }

    fn set_form_input(&mut self, id: &str, value: &str) -> bool {
        let Some(input) = self.form.iter_mut().find(|input| input.id == id) else {
            return false;
        };
        input.value = value.to_string();
        self.screen
            .lock()
            .inputs
            .insert(id.to_string(), value.to_string());
        true
    }

    fn form_inputs(&self) -> Vec<FormInput> {
        self.form.clone()
    }

    fn show_validation(&mut self, errors: &[FieldError]) {
        self.screen.lock().validation = errors.to_vec();
    }
}

fn surface() -> (ControlSurface<TestPage>, SharedScreen) {
    surface_with(TestPage::new())
}

fn surface_with(page: TestPage) -> (ControlSurface<TestPage>, SharedScreen) {
    let screen = Arc::clone(&page.screen);
    (ControlSurface::bind(page).unwrap(), screen)
}

fn range_value(surface: &ControlSurface<TestPage>, key: DeviceKey) -> u16 {
    surface.controls().range(key).unwrap().value()
}

fn power(surface: &ControlSurface<TestPage>) -> bool {
    surface.controls().toggle(DeviceKey::Power).unwrap().value()
}

// ============================================================================
// Incoming state
// ============================================================================

mod incoming_state {
    use super::*;

    #[test]
    fn power_off_string_is_the_only_off() {
        let (mut surface, _) = surface();

        surface.handle_message(r#"{"state":"ON"}"#);
        assert!(power(&surface));

        surface.handle_message(r#"{"state":"OFF"}"#);
        assert!(!power(&surface));

        for other in [r#""on""#, r#""off""#, r#""1""#, r#""""#, "0", "false"] {
            surface.handle_message(r#"{"state":"OFF"}"#);
            surface.handle_message(&format!(r#"{{"state":{other}}}"#));
            assert!(power(&surface), "state {other} should mean on");
        }
    }

    #[test]
    fn color_update_sets_each_channel() {
        let (mut surface, screen) = surface();

        let applied = surface.handle_message(r#"{"color":{"r":10,"g":20,"b":30}}"#);

        assert_eq!(applied, 1);
        assert_eq!(range_value(&surface, DeviceKey::Red), 10);
        assert_eq!(range_value(&surface, DeviceKey::Green), 20);
        assert_eq!(range_value(&surface, DeviceKey::Blue), 30);
        assert_eq!(surface.snapshot().color, RgbColor::new(10, 20, 30));

        let screen = screen.lock();
        assert_eq!(screen.ranges[&DeviceKey::Green].last().unwrap().readout(), "20");
    }

    #[test]
    fn levels_and_gamma_reach_their_controls() {
        let (mut surface, screen) = surface();

        surface.handle_message(
            r#"{"brightness":"128","color_temp":326,"white_value":7,"gamma":true}"#,
        );

        let state = surface.snapshot();
        assert_eq!(state.brightness, 128);
        assert_eq!(state.color_temp, 326);
        assert_eq!(state.white_value, 7);
        assert!(state.gamma);
        assert_eq!(screen.lock().toggles[&DeviceKey::Gamma], vec![true]);
    }

    #[test]
    fn levels_outside_bounds_are_clamped() {
        let (mut surface, _) = surface();

        surface.handle_message(r#"{"color_temp":90,"brightness":999}"#);

        assert_eq!(range_value(&surface, DeviceKey::ColorTemp), 153);
        assert_eq!(range_value(&surface, DeviceKey::Brightness), 255);
    }

    #[test]
    fn garbage_changes_nothing() {
        let (mut surface, screen) = surface();
        surface.handle_message(r#"{"state":"ON","brightness":42}"#);
        let before = surface.snapshot();
        let renders = screen.lock().ranges[&DeviceKey::Brightness].len();

        for garbage in [
            "",
            "not json",
            "{",
            "[1,2,3]",
            "\"state\"",
            "42",
            "null",
            "{\"brightness\":}",
            "\u{0}\u{1}\u{2}",
        ] {
            assert_eq!(surface.handle_message(garbage), 0, "{garbage:?}");
        }

        assert_eq!(surface.snapshot(), before);
        assert_eq!(screen.lock().ranges[&DeviceKey::Brightness].len(), renders);
    }

    #[test]
    fn wrong_typed_key_drops_whole_message() {
        let (mut surface, _) = surface();
        surface.handle_message(r#"{"state":"ON"}"#);

        let applied = surface.handle_message(r#"{"state":"OFF","brightness":"bright"}"#);

        assert_eq!(applied, 0);
        assert!(power(&surface));
        assert_eq!(range_value(&surface, DeviceKey::Brightness), 0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (mut surface, _) = surface();

        let applied = surface.handle_message(r#"{"hue":300,"effect":"rainbow","white_value":9}"#);

        assert_eq!(applied, 1);
        assert_eq!(range_value(&surface, DeviceKey::WhiteValue), 9);
    }

    #[test]
    fn device_info_sets_title_and_displays() {
        let (mut surface, screen) = surface();

        surface.handle_message(r#"{"d":{"app_name":"RGBW Light","app_version":"1.2.0"}}"#);

        let screen = screen.lock();
        assert_eq!(screen.title.as_deref(), Some("RGBW Light"));
        assert_eq!(screen.displays["app_version"], "1.2.0");
        assert!(screen.inputs.is_empty());
    }

    #[test]
    fn settings_fan_out_to_displays_and_inputs() {
        let (mut surface, screen) = surface();

        surface.handle_message(r#"{"d":{"app_name":"RGBW Light"}}"#);
        surface.handle_message(r#"{"s":{"hostname":"porch","wifi_ssid":"home","mqtt_port":1883}}"#);

        {
            let screen = screen.lock();
            assert_eq!(screen.title.as_deref(), Some("RGBW Light - porch"));
            assert_eq!(screen.displays["hostname"], "porch");
            assert_eq!(screen.displays["mqtt_port"], "1883");
            // Form inputs are matched by their exact identifier
            assert!(screen.inputs.is_empty());
        }
        assert_eq!(surface.title().as_deref(), Some("RGBW Light - porch"));

        // Repeated settings pushes do not grow the title
        surface.handle_message(r#"{"s":{"hostname":"porch"}}"#);
        assert_eq!(screen.lock().title.as_deref(), Some("RGBW Light - porch"));
    }

    #[test]
    fn settings_fill_inputs_with_matching_identifier() {
        let mut page = TestPage::new();
        page.form.push(FormInput::new("hostname", ""));
        let (mut surface, screen) = surface_with(page);

        surface.handle_message(r#"{"s":{"hostname":"kitchen"}}"#);

        assert_eq!(screen.lock().inputs["hostname"], "kitchen");
    }
}

// ============================================================================
// Outgoing intents
// ============================================================================

mod outgoing_intents {
    use super::*;

    #[test]
    fn brightness_commit_sends_exactly_one_intent() {
        let (mut surface, _) = surface();
        let mut sent: Vec<String> = Vec::new();

        surface.slide(DeviceKey::Brightness, 40);
        surface.slide(DeviceKey::Brightness, 79);
        assert!(sent.is_empty());

        assert!(surface.commit(DeviceKey::Brightness, 80, &mut sent));

        assert_eq!(sent, vec![r#"{"brightness":80,"state":"ON"}"#]);
        let payload = decode(&sent[0]).unwrap();
        assert_eq!(payload.get("brightness"), Some(&serde_json::json!(80)));
    }

    #[test]
    fn rgb_commit_sends_all_three_channels() {
        let (mut surface, _) = surface();
        let mut sent: Vec<String> = Vec::new();
        surface.handle_message(r#"{"color":{"r":10,"g":20,"b":30}}"#);

        surface.commit(DeviceKey::Green, 99, &mut sent);
        surface.commit(DeviceKey::Green, 99, &mut sent);

        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
        let payload = decode(&sent[0]).unwrap();
        assert_eq!(
            payload.get("color"),
            Some(&serde_json::json!({"r": 10, "g": 99, "b": 30}))
        );
        assert_eq!(payload.get("state"), Some(&serde_json::json!("ON")));
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn toggles_send_on_off_and_raw_boolean() {
        let (mut surface, screen) = surface();
        let mut sent: Vec<String> = Vec::new();

        surface.toggle(DeviceKey::Power, &mut sent);
        surface.toggle(DeviceKey::Power, &mut sent);
        surface.toggle(DeviceKey::Gamma, &mut sent);

        assert_eq!(
            sent,
            vec![
                r#"{"state":"ON"}"#,
                r#"{"state":"OFF"}"#,
                r#"{"gamma":true}"#,
            ]
        );
        assert_eq!(screen.lock().toggles[&DeviceKey::Power], vec![true, false]);
    }

    #[test]
    fn authoritative_updates_never_send() {
        let (mut surface, screen) = surface();
        let mut sent: Vec<String> = Vec::new();

        for value in 0..100u16 {
            surface.handle_message(&format!(r#"{{"brightness":{value},"state":"ON"}}"#));
        }
        assert!(sent.is_empty());
        assert_eq!(range_value(&surface, DeviceKey::Brightness), 99);
        // One render on bind plus one per update
        assert_eq!(screen.lock().ranges[&DeviceKey::Brightness].len(), 101);

        surface.commit(DeviceKey::Brightness, 5, &mut sent);
        assert_eq!(sent.len(), 1);
    }

    #[test]
    fn degenerate_bounds_render_empty_fill() {
        let bounds = RangeBounds::new(50, 50).unwrap();
        let page = TestPage::new().with_bounds(DeviceKey::WhiteValue, bounds);
        let (mut surface, screen) = surface_with(page);
        let mut sent: Vec<String> = Vec::new();

        surface.handle_message(r#"{"white_value":50}"#);
        surface.commit(DeviceKey::WhiteValue, 200, &mut sent);

        let screen = screen.lock();
        for view in &screen.ranges[&DeviceKey::WhiteValue] {
            assert_eq!(view.fill, Fill::EMPTY);
            assert_eq!(view.value, 50);
        }
        assert_eq!(sent, vec![r#"{"state":"ON","white_value":50}"#]);
    }

    #[test]
    fn every_intent_shape_survives_the_codec() {
        let mut fields = BTreeMap::new();
        fields.insert("hostname".to_string(), "porch".to_string());

        for intent in [
            Intent::Power(PowerState::Off),
            Intent::Brightness(12),
            Intent::ColorTemp(400),
            Intent::Color(RgbColor::new(1, 2, 3)),
            Intent::WhiteValue(255),
            Intent::Gamma(true),
            Intent::Command(DeviceCommand::Reset),
            Intent::Settings(fields),
        ] {
            let decoded = decode(&encode(&intent)).unwrap();
            assert_eq!(decoded, intent.to_payload(), "{intent:?}");
        }
    }
}

// ============================================================================
// Settings form
// ============================================================================

mod settings_form {
    use super::*;

    fn fill(surface: &mut ControlSurface<TestPage>, values: &[(&str, &str)]) {
        for (id, value) in values {
            assert!(surface.page_mut().set_form_input(id, value));
        }
    }

    #[test]
    fn invalid_fields_block_the_save() {
        let (mut surface, screen) = surface();
        let mut sent: Vec<String> = Vec::new();
        fill(
            &mut surface,
            &[("general.hostname", "-porch"), ("wifi.wifi_psk", "1234")],
        );

        let errors = surface.save_settings(&mut sent).unwrap_err();

        assert!(sent.is_empty());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].error, ValidationError::InvalidHostname);
        assert_eq!(errors[1].error, ValidationError::PassphraseTooShort);
        assert_eq!(screen.lock().validation, errors);
    }

    #[test]
    fn valid_form_is_sent_under_settings_key() {
        let (mut surface, screen) = surface();
        let mut sent: Vec<String> = Vec::new();
        fill(
            &mut surface,
            &[
                ("general.hostname", "porch"),
                ("wifi.wifi_ssid", "home"),
                ("wifi.wifi_psk", "correct horse"),
            ],
        );

        assert_eq!(surface.save_settings(&mut sent), Ok(true));

        assert_eq!(
            sent,
            vec![r#"{"s":{"hostname":"porch","wifi_psk":"correct horse","wifi_ssid":"home"}}"#]
        );
        assert!(screen.lock().validation.is_empty());
    }
}
