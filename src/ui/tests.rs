//! Unit tests for input classification, the menu ring and rendering.
//!
//! These tests run on the host (not embedded) and drive time by hand.

use heapless::{String, Vec};

use super::input_logic::{ButtonClassifier, ButtonState, PotGestures};
use super::menu::{Menu, MenuAction};
use super::render::{value_text, Renderer, View};
use super::{CharDisplay, InputEvent, Screen};
use crate::config::{DISPLAY_BLANK_GLYPH, DISPLAY_REFRESH_MS};
use crate::led::OperatingMode;
use crate::settings::Configuration;
use crate::time::Millis;

/// Hold the button from `0` to `held_ms`, sampling every 10 ms, then
/// release one sample later. Returns every event emitted.
fn press(classifier: &mut ButtonClassifier, held_ms: u64) -> Vec<InputEvent, 8> {
    let mut events = Vec::new();
    let mut t = 0;
    while t <= held_ms {
        if let Some(e) = classifier.update(true, Millis(t)) {
            let _ = events.push(e);
        }
        t += 10;
    }
    if let Some(e) = classifier.update(false, Millis(held_ms + 1)) {
        let _ = events.push(e);
    }
    events
}

// ═══════════════════════════════════════════════════════════════════════════
// Button Classifier Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn button_600ms_is_one_long_press() {
    let mut classifier = ButtonClassifier::new();
    assert_eq!(&press(&mut classifier, 600)[..], &[InputEvent::LongPress]);
    assert_eq!(classifier.state(), ButtonState::Idle);
}

#[test]
fn button_200ms_is_one_short_press() {
    let mut classifier = ButtonClassifier::new();
    assert_eq!(&press(&mut classifier, 200)[..], &[InputEvent::ShortPress]);
}

#[test]
fn button_20ms_is_ignored() {
    let mut classifier = ButtonClassifier::new();
    assert!(press(&mut classifier, 20).is_empty());
}

#[test]
fn button_states_follow_hold_time() {
    let mut classifier = ButtonClassifier::new();
    classifier.update(true, Millis(1_000));
    assert_eq!(
        classifier.state(),
        ButtonState::DebounceWait {
            since: Millis(1_000)
        }
    );
    classifier.update(true, Millis(1_050));
    assert_eq!(
        classifier.state(),
        ButtonState::ShortHeld {
            since: Millis(1_000)
        }
    );
    classifier.update(true, Millis(1_500));
    assert_eq!(classifier.state(), ButtonState::LongHeld);
}

#[test]
fn button_flags_reset_between_presses() {
    let mut classifier = ButtonClassifier::new();
    assert_eq!(&press(&mut classifier, 700)[..], &[InputEvent::LongPress]);
    // A fresh short press must not inherit the previous long hold.
    let mut events = Vec::<InputEvent, 4>::new();
    for t in [2_000u64, 2_060, 2_120] {
        assert!(classifier.update(true, Millis(t)).is_none());
    }
    if let Some(e) = classifier.update(false, Millis(2_130)) {
        let _ = events.push(e);
    }
    assert_eq!(&events[..], &[InputEvent::ShortPress]);
    assert!(classifier.update(false, Millis(2_200)).is_none());
}

#[test]
fn release_without_sampled_hold_emits_nothing() {
    let mut classifier = ButtonClassifier::new();
    classifier.update(true, Millis(0));
    classifier.update(true, Millis(40));
    // Released late, but the last pressed sample was under 50 ms.
    assert!(classifier.update(false, Millis(90)).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Potentiometer Gesture Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn gesture_needs_threshold_travel() {
    let mut pot = PotGestures::new(50.0, Millis(0));
    assert!(pot.update(54.9, Millis(200)).is_none());
    assert_eq!(pot.update(55.0, Millis(210)), Some(InputEvent::GestureUp));
    assert_eq!(pot.update(49.0, Millis(400)), Some(InputEvent::GestureDown));
}

#[test]
fn gesture_rate_limited_by_poll_interval() {
    let mut pot = PotGestures::new(50.0, Millis(0));
    assert!(pot.update(80.0, Millis(99)).is_none());
    assert_eq!(pot.update(80.0, Millis(100)), Some(InputEvent::GestureUp));
    // Re-anchored at 80 %, and the interval restarts.
    assert!(pot.update(90.0, Millis(150)).is_none());
    assert_eq!(pot.update(90.0, Millis(200)), Some(InputEvent::GestureUp));
}

#[test]
fn tracking_reanchors_without_events() {
    let mut pot = PotGestures::new(10.0, Millis(0));
    pot.track(90.0, Millis(1_000));
    assert!(pot.update(91.0, Millis(1_200)).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Menu Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn screen_ring_wraps_both_ways() {
    assert_eq!(Screen::Start.prev(), Screen::FadeStep);
    assert_eq!(Screen::FadeStep.next(), Screen::Start);

    let mut screen = Screen::Start;
    for _ in 0..7 {
        assert_eq!(screen.next().prev(), screen);
        screen = screen.next();
    }
    assert_eq!(screen, Screen::Start);
}

#[test]
fn gestures_move_between_screens() {
    let mut menu = Menu::new();
    assert_eq!(
        menu.handle(InputEvent::GestureDown),
        MenuAction::ScreenChanged(Screen::FadeStep)
    );
    assert_eq!(
        menu.handle(InputEvent::GestureUp),
        MenuAction::ScreenChanged(Screen::Start)
    );
    assert_eq!(
        menu.handle(InputEvent::GestureUp),
        MenuAction::ScreenChanged(Screen::Contrast)
    );
}

#[test]
fn long_press_toggles_editing_and_commits_on_exit() {
    let mut menu = Menu::new();
    menu.handle(InputEvent::GestureUp);
    assert_eq!(menu.handle(InputEvent::LongPress), MenuAction::EditStarted);
    assert!(menu.is_editing());

    // Gestures and short presses are inert while editing.
    assert_eq!(menu.handle(InputEvent::GestureUp), MenuAction::None);
    assert_eq!(menu.handle(InputEvent::ShortPress), MenuAction::None);
    assert_eq!(menu.screen(), Screen::Contrast);

    assert_eq!(menu.handle(InputEvent::LongPress), MenuAction::EditCommitted);
    assert!(!menu.is_editing());
}

#[test]
fn short_press_advances_mode_only_on_start_screen() {
    let mut menu = Menu::new();
    assert_eq!(menu.handle(InputEvent::ShortPress), MenuAction::AdvanceMode);
    menu.handle(InputEvent::GestureUp);
    assert_eq!(menu.handle(InputEvent::ShortPress), MenuAction::None);
}

#[test]
fn editing_scales_pot_per_field() {
    let mut config = Configuration::default();
    let mut menu = Menu::new();

    menu.apply_pot(50.0, &mut config);
    assert_eq!(config, Configuration::default());

    let cases: [(Screen, fn(&Configuration) -> f32, f32); 6] = [
        (Screen::Contrast, |c| c.display_contrast as f32, 127.0),
        (Screen::DisplayBrightness, |c| c.display_brightness as f32, 127.0),
        (Screen::LedMax, |c| c.led_max_brightness as f32, 127.0),
        (Screen::LedMin, |c| c.led_min_brightness as f32, 127.0),
        (Screen::LightThreshold, |c| c.light_threshold, 50.0),
        (Screen::FadeStep, |c| c.fade_step_ms as f32, 500.0),
    ];
    for (screen, field, expected) in cases {
        menu.handle(InputEvent::GestureUp);
        assert_eq!(menu.screen(), screen);
        menu.apply_pot(50.0, &mut config);
        assert_eq!(field(&config), expected);
    }

    menu.handle(InputEvent::GestureDown);
    menu.apply_pot(100.0, &mut config);
    assert_eq!(config.light_threshold, 100.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Render Tests
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, PartialEq)]
enum Op {
    Clear,
    Cursor(u8, u8),
    Text(String<16>),
    Glyph(u8),
}

#[derive(Default)]
struct DisplayLog {
    ops: Vec<Op, 128>,
}

impl CharDisplay for DisplayLog {
    fn clear(&mut self) {
        let _ = self.ops.push(Op::Clear);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let _ = self.ops.push(Op::Cursor(col, row));
    }

    fn print(&mut self, text: &str) {
        let _ = self.ops.push(Op::Text(String::try_from(text).unwrap()));
    }

    fn write_glyph(&mut self, glyph: u8) {
        let _ = self.ops.push(Op::Glyph(glyph));
    }
}

fn text(s: &str) -> Op {
    Op::Text(String::try_from(s).unwrap())
}

#[test]
fn start_screen_full_draw() {
    let config = Configuration::default();
    let view = View {
        screen: Screen::Start,
        mode: OperatingMode::Fade,
        light_pct: 42.5,
        config: &config,
    };
    let mut display = DisplayLog::default();
    let mut renderer = Renderer::new();

    renderer.render(&mut display, &view, Millis(0));
    assert_eq!(
        &display.ops[..],
        &[
            Op::Clear,
            Op::Cursor(0, 0),
            text("Mode: "),
            text("On(Fade)"),
            Op::Cursor(0, 1),
            text("Light: "),
            text("42.50%"),
        ]
    );
    assert_eq!(renderer.drawn(), Some(Screen::Start));
}

#[test]
fn refresh_is_throttled_and_partial() {
    let config = Configuration::default();
    let mut view = View {
        screen: Screen::LedMax,
        mode: OperatingMode::On,
        light_pct: 0.0,
        config: &config,
    };
    let mut display = DisplayLog::default();
    let mut renderer = Renderer::new();

    renderer.render(&mut display, &view, Millis(0));
    let drawn = display.ops.len();

    renderer.render(&mut display, &view, Millis(DISPLAY_REFRESH_MS - 1));
    assert_eq!(display.ops.len(), drawn);

    renderer.render(&mut display, &view, Millis(DISPLAY_REFRESH_MS));
    let refresh = &display.ops[drawn..];
    assert!(!refresh.contains(&Op::Clear));
    assert_eq!(
        refresh
            .iter()
            .filter(|op| **op == Op::Glyph(DISPLAY_BLANK_GLYPH))
            .count(),
        16
    );
    assert_eq!(refresh.last(), Some(&text("255")));

    // Screen change forces a full redraw immediately.
    view.screen = Screen::LedMin;
    let before = display.ops.len();
    renderer.render(&mut display, &view, Millis(DISPLAY_REFRESH_MS + 1));
    assert_eq!(display.ops[before], Op::Clear);
}

#[test]
fn value_text_per_screen() {
    let config = Configuration::default();
    let mut view = View {
        screen: Screen::LightThreshold,
        mode: OperatingMode::Off,
        light_pct: 12.0,
        config: &config,
    };
    assert_eq!(value_text(&view).as_str(), "25.00(12.00%)");
    view.screen = Screen::FadeStep;
    assert_eq!(value_text(&view).as_str(), "25");
    view.screen = Screen::Contrast;
    assert_eq!(value_text(&view).as_str(), "125");
}
