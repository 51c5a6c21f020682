//! The clock's per-tick state machine.
//!
//! [`ClockController::tick`] is a pure function of the controller state and a [`TickInput`]
//! (live time, button levels, monotonic timestamp). It returns a [`TickOutcome`] naming the side
//! effects the caller must perform: push the frame, commit an edited time, or persist settings.

use embassy_time::Instant;
use heapless::Vec;

use crate::{
    Result,
    button::{ButtonEvent, Buttons, KEY_COUNT, Level},
    config::{DEBOUNCE_WINDOW, HOLD_WINDOW, SAVE_QUIET_WINDOW},
    menu::{Menu, Mode},
    render::{CLOCK_RENDERER, ClockFrame},
    settings::{SaveTracker, Settings},
    settings_store::SettingsStore,
    time_of_day::TimeOfDay,
};

/// Everything the controller needs to know about the outside world for one tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TickInput {
    /// Monotonic timestamp of this tick.
    pub now: Instant,
    /// The clock source's current time.
    pub time: TimeOfDay,
    /// Button levels in [`crate::Key::ALL`] order.
    pub levels: [Level; KEY_COUNT],
}

/// Side effects requested by one tick, in the order the caller should apply them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickOutcome {
    /// Debounced button actions handled this tick, for diagnostics.
    pub events: Vec<ButtonEvent, KEY_COUNT>,
    /// Write this time to the clock source (the user left time edit).
    pub commit_time: Option<TimeOfDay>,
    /// The frame was redrawn and should be pushed to the LEDs.
    pub redraw: bool,
    /// Persist this settings byte. The controller already considers it saved; call
    /// [`ClockController::save_failed`] if the write does not succeed.
    pub save_settings: Option<u8>,
}

/// Owns all clock state: settings, menu, buttons, and the frame buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClockController {
    settings: Settings,
    save_tracker: SaveTracker,
    menu: Menu,
    buttons: Buttons,
    frame: ClockFrame,
    last_time: Option<TimeOfDay>,
}

impl ClockController {
    /// Start in the display menu with the given settings.
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self {
            settings,
            save_tracker: SaveTracker::new(),
            menu: Menu::new(),
            buttons: Buttons::new(DEBOUNCE_WINDOW, HOLD_WINDOW),
            frame: ClockFrame::new(),
            last_time: None,
        }
    }

    /// Start from the persisted settings byte.
    #[must_use]
    pub const fn from_settings_byte(byte: u8) -> Self {
        Self::new(Settings::from_byte(byte))
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.menu.mode()
    }

    /// The most recently rendered frame.
    #[must_use]
    pub const fn frame(&self) -> &ClockFrame {
        &self.frame
    }

    /// True while settings changes are waiting for their quiet window.
    #[must_use]
    pub const fn is_save_pending(&self) -> bool {
        self.save_tracker.is_dirty()
    }

    /// Run one control-loop iteration.
    ///
    /// Redraws when the live time changed, then applies each debounced button action to
    /// completion (re-rendering after each), then checks whether settings are due to be saved.
    pub fn tick(&mut self, input: TickInput) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.last_time != Some(input.time) {
            self.redraw(input.time);
            outcome.redraw = true;
        }
        self.last_time = Some(input.time);

        for event in self.buttons.poll(input.levels, input.now) {
            let effect = self.menu.handle(event, &mut self.settings, input.time);
            if effect.settings_changed {
                self.save_tracker.mark_changed(input.now);
            }
            if effect.commit_time.is_some() {
                outcome.commit_time = effect.commit_time;
            }
            self.redraw(input.time);
            outcome.redraw = true;
            // `events` has the same capacity as the poll result.
            let _ = outcome.events.push(event);
        }

        if self.save_tracker.due(input.now, SAVE_QUIET_WINDOW) {
            self.save_tracker.clear();
            outcome.save_settings = Some(self.settings.to_byte());
        }

        outcome
    }

    /// The settings write requested at `now` failed. Try again after another quiet window.
    pub const fn save_failed(&mut self, now: Instant) {
        self.save_tracker.mark_changed(now);
    }

    /// Write a settings byte requested by [`Self::tick`] to `store`, re-arming the save if the
    /// write fails.
    ///
    /// # Errors
    ///
    /// Returns the store's error after re-arming.
    pub fn persist<S: SettingsStore>(
        &mut self,
        store: &mut S,
        byte: u8,
        now: Instant,
    ) -> Result<()> {
        store.save(byte).inspect_err(|_| self.save_failed(now))
    }

    fn redraw(&mut self, live_time: TimeOfDay) {
        let (digits, highlighted) = self.menu.shown_digits(live_time);
        CLOCK_RENDERER.render(&mut self.frame, &self.settings, digits, highlighted);
    }
}
