//! Polled, debounced push-buttons with hold detection.
//!
//! Buttons are active-low. Each poll compares the sampled [`Level`] with the previous sample:
//!
//! - A high→low edge more than the debounce window after the button's last action is a short
//!   press. It stamps the time and arms hold detection.
//! - While the button stays low and hold detection is armed, passing the hold window reports a
//!   long press, re-stamps, and disarms. A hold therefore fires once per physical press, however
//!   long the button is kept down.
//! - Releasing the button disarms hold detection.

use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Number of buttons on the clock.
pub const KEY_COUNT: usize = 3;

/// The three front-panel buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Menu,
    Minus,
    Plus,
}

impl Key {
    /// All keys, in polling order.
    pub const ALL: [Self; KEY_COUNT] = [Self::Menu, Self::Minus, Self::Plus];
}

/// A sampled input level. Buttons pull the line low when pressed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    High,
    Low,
}

/// Whether a debounced action is the initial press or the hold that follows it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressDuration {
    #[default]
    Short,
    Long,
}

/// A debounced button action.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub key: Key,
    pub duration: PressDuration,
}

/// Runtime state of one button.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Button {
    previous: Level,
    last_action: Option<Instant>,
    hold_armed: bool,
}

impl Button {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous: Level::High,
            last_action: None,
            hold_armed: false,
        }
    }

    /// Feed one sample taken at `now`; returns the press or hold it completes, if any.
    pub fn poll(
        &mut self,
        level: Level,
        now: Instant,
        debounce: Duration,
        hold: Duration,
    ) -> Option<PressDuration> {
        let mut result = None;

        if level == Level::Low && self.previous == Level::High && self.elapsed_beyond(now, debounce)
        {
            self.last_action = Some(now);
            self.hold_armed = true;
            result = Some(PressDuration::Short);
        }

        if level == Level::Low && self.hold_armed && self.elapsed_beyond(now, hold) {
            self.last_action = Some(now);
            self.hold_armed = false;
            result = Some(PressDuration::Long);
        }

        if level == Level::High {
            self.hold_armed = false;
        }

        self.previous = level;
        result
    }

    /// True if more than `window` has passed since the last action, or there was none.
    fn elapsed_beyond(&self, now: Instant, window: Duration) -> bool {
        self.last_action
            .is_none_or(|last_action| now.saturating_duration_since(last_action) > window)
    }
}

/// The clock's three buttons and their timing windows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Buttons {
    buttons: [Button; KEY_COUNT],
    debounce: Duration,
    hold: Duration,
}

impl Buttons {
    #[must_use]
    pub const fn new(debounce: Duration, hold: Duration) -> Self {
        Self {
            buttons: [Button::new(); KEY_COUNT],
            debounce,
            hold,
        }
    }

    /// Poll every button once, in [`Key::ALL`] order. `levels` is indexed the same way.
    pub fn poll(
        &mut self,
        levels: [Level; KEY_COUNT],
        now: Instant,
    ) -> Vec<ButtonEvent, KEY_COUNT> {
        let mut events = Vec::new();
        for ((button, level), key) in self.buttons.iter_mut().zip(levels).zip(Key::ALL) {
            if let Some(duration) = button.poll(level, now, self.debounce, self.hold) {
                // At most one event per button per poll, so the vector cannot overflow.
                let _ = events.push(ButtonEvent { key, duration });
            }
        }
        events
    }
}
