//! Host-level tests for button debouncing and hold detection.

use embassy_time::{Duration, Instant};
use matrix_clock::{
    ButtonEvent, Buttons, Key, Level, PressDuration,
    button::Button,
    config::{DEBOUNCE_WINDOW, HOLD_WINDOW},
};

const DEBOUNCE: Duration = Duration::from_millis(200);
const HOLD: Duration = Duration::from_millis(1000);

fn poll(button: &mut Button, level: Level, millis: u64) -> Option<PressDuration> {
    button.poll(level, Instant::from_millis(millis), DEBOUNCE, HOLD)
}

#[test]
fn first_press_is_reported_immediately() {
    let mut button = Button::new();
    assert_eq!(poll(&mut button, Level::High, 0), None);
    assert_eq!(poll(&mut button, Level::Low, 10), Some(PressDuration::Short));
    assert_eq!(poll(&mut button, Level::Low, 20), None);
}

#[test]
fn bounces_inside_the_debounce_window_are_ignored() {
    let mut button = Button::new();
    assert_eq!(poll(&mut button, Level::Low, 1000), Some(PressDuration::Short));
    assert_eq!(poll(&mut button, Level::High, 1050), None);
    assert_eq!(poll(&mut button, Level::Low, 1100), None);
    assert_eq!(poll(&mut button, Level::High, 1150), None);
    // Exactly 200 ms is still inside the window.
    assert_eq!(poll(&mut button, Level::Low, 1200), None);
    assert_eq!(poll(&mut button, Level::High, 1205), None);
    assert_eq!(poll(&mut button, Level::Low, 1210), Some(PressDuration::Short));
}

#[test]
fn hold_fires_once_per_press() {
    let mut button = Button::new();
    assert_eq!(poll(&mut button, Level::Low, 0), Some(PressDuration::Short));
    assert_eq!(poll(&mut button, Level::Low, 1000), None);
    assert_eq!(poll(&mut button, Level::Low, 1001), Some(PressDuration::Long));
    for millis in (1010..5000).step_by(10) {
        assert_eq!(poll(&mut button, Level::Low, millis), None);
    }
    assert_eq!(poll(&mut button, Level::High, 5000), None);
    assert_eq!(poll(&mut button, Level::Low, 5010), Some(PressDuration::Short));
}

#[test]
fn pressing_again_restarts_the_hold_window() {
    let mut button = Button::new();
    assert_eq!(poll(&mut button, Level::Low, 0), Some(PressDuration::Short));
    assert_eq!(poll(&mut button, Level::High, 900), None);
    assert_eq!(poll(&mut button, Level::Low, 950), Some(PressDuration::Short));
    assert_eq!(poll(&mut button, Level::Low, 1960), Some(PressDuration::Long));
}

#[test]
fn a_bounce_does_not_rearm_the_hold() {
    let mut button = Button::new();
    assert_eq!(poll(&mut button, Level::Low, 0), Some(PressDuration::Short));
    assert_eq!(poll(&mut button, Level::High, 50), None);
    assert_eq!(poll(&mut button, Level::Low, 100), None);
    assert_eq!(poll(&mut button, Level::Low, 2000), None);
}

#[test]
fn buttons_report_in_key_order() {
    let mut buttons = Buttons::new(DEBOUNCE_WINDOW, HOLD_WINDOW);
    let events = buttons.poll([Level::Low, Level::High, Level::Low], Instant::from_millis(0));
    assert_eq!(
        events.as_slice(),
        [
            ButtonEvent {
                key: Key::Menu,
                duration: PressDuration::Short
            },
            ButtonEvent {
                key: Key::Plus,
                duration: PressDuration::Short
            },
        ]
    );

    let events = buttons.poll([Level::Low, Level::Low, Level::Low], Instant::from_millis(1500));
    assert_eq!(
        events.as_slice(),
        [
            ButtonEvent {
                key: Key::Menu,
                duration: PressDuration::Long
            },
            ButtonEvent {
                key: Key::Minus,
                duration: PressDuration::Short
            },
            ButtonEvent {
                key: Key::Plus,
                duration: PressDuration::Long
            },
        ]
    );
}
