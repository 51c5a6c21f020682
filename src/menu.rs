//! The two-level button menu.
//!
//! The top level is a [`Mode`]: showing the live time while the buttons adjust display settings,
//! or editing a draft of the time. Each mode cycles independently through its three fields.
//!
//! ```text
//!                     hold Menu (draft := live time)
//!   Display(Color) ──────────────────────────────▶ TimeEdit(Seconds)
//!        ▲    │ press Menu                               │ press Menu
//!        │    ▼                                          ▼
//!        │  Display(Brightness)                  TimeEdit(Minutes)
//!        │    │ press Menu                               │ press Menu
//!        │    ▼                                          ▼
//!        │  Display(Orientation) ─▶ Color        TimeEdit(Hours) ─▶ Seconds
//!        │                                               │
//!        └───────────────────────────────────────────────┘
//!                    hold Menu (commit draft)
//! ```

use crate::{
    button::{ButtonEvent, Key, PressDuration},
    settings::{Direction, Settings},
    time_of_day::TimeOfDay,
};

/// The display setting that +/- adjusts.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayField {
    #[default]
    Color,
    Brightness,
    Orientation,
}

impl DisplayField {
    /// The next field, wrapping after the last.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Color => Self::Brightness,
            Self::Brightness => Self::Orientation,
            Self::Orientation => Self::Color,
        }
    }
}

/// The time field that +/- adjusts.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeField {
    /// The next field, wrapping after the last.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Seconds => Self::Minutes,
            Self::Minutes => Self::Hours,
            Self::Hours => Self::Seconds,
        }
    }

    /// One past the largest value of the field.
    #[must_use]
    pub const fn limit(self) -> u8 {
        match self {
            Self::Seconds | Self::Minutes => 60,
            Self::Hours => 24,
        }
    }

    /// The field's two digit slots, left to right.
    #[must_use]
    pub const fn slots(self) -> [usize; 2] {
        match self {
            Self::Hours => [0, 1],
            Self::Minutes => [2, 3],
            Self::Seconds => [4, 5],
        }
    }
}

/// Top-level menu mode. The time draft exists only while editing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Display(DisplayField),
    TimeEdit { field: TimeField, draft: TimeOfDay },
}

impl Default for Mode {
    fn default() -> Self {
        Self::Display(DisplayField::default())
    }
}

/// What the rest of the clock must do after the menu handled an event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuEffect {
    /// Settings changed and should eventually be persisted.
    pub settings_changed: bool,
    /// The edited time must be written to the clock source.
    pub commit_time: Option<TimeOfDay>,
}

/// Menu state machine.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Menu {
    mode: Mode,
}

impl Menu {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: Mode::Display(DisplayField::Color),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply one debounced button event.
    ///
    /// `live_time` is the clock source's current time, used when entering time edit.
    pub fn handle(
        &mut self,
        event: ButtonEvent,
        settings: &mut Settings,
        live_time: TimeOfDay,
    ) -> MenuEffect {
        match (event.duration, event.key) {
            (PressDuration::Short, Key::Menu) => {
                self.next_field();
                MenuEffect::default()
            }
            (PressDuration::Short, Key::Minus) => self.adjust(Direction::Down, settings),
            (PressDuration::Short, Key::Plus) => self.adjust(Direction::Up, settings),
            (PressDuration::Long, Key::Menu) => self.toggle_mode(live_time),
            (PressDuration::Long, Key::Minus | Key::Plus) => MenuEffect::default(),
        }
    }

    /// Advance to the next field of the current mode.
    pub const fn next_field(&mut self) {
        self.mode = match self.mode {
            Mode::Display(field) => Mode::Display(field.next()),
            Mode::TimeEdit { field, draft } => Mode::TimeEdit {
                field: field.next(),
                draft,
            },
        };
    }

    fn adjust(&mut self, direction: Direction, settings: &mut Settings) -> MenuEffect {
        match &mut self.mode {
            Mode::Display(field) => {
                match field {
                    DisplayField::Color => settings.adjust_color(direction),
                    DisplayField::Brightness => settings.adjust_brightness(direction),
                    DisplayField::Orientation => settings.toggle_orientation(),
                }
                MenuEffect {
                    settings_changed: true,
                    commit_time: None,
                }
            }
            Mode::TimeEdit { field, draft } => {
                draft.adjust(*field, direction);
                MenuEffect::default()
            }
        }
    }

    fn toggle_mode(&mut self, live_time: TimeOfDay) -> MenuEffect {
        match self.mode {
            Mode::Display(_) => {
                self.mode = Mode::TimeEdit {
                    field: TimeField::Seconds,
                    draft: live_time,
                };
                MenuEffect::default()
            }
            Mode::TimeEdit { draft, .. } => {
                self.mode = Mode::Display(DisplayField::Color);
                MenuEffect {
                    settings_changed: false,
                    commit_time: Some(draft),
                }
            }
        }
    }

    /// The digits to show and, for each slot, whether it is under the edit cursor.
    #[must_use]
    pub fn shown_digits(&self, live_time: TimeOfDay) -> ([u8; 6], [bool; 6]) {
        match self.mode {
            Mode::Display(_) => (live_time.digits(), [false; 6]),
            Mode::TimeEdit { field, draft } => {
                let mut highlighted = [false; 6];
                for slot in field.slots() {
                    if let Some(flag) = highlighted.get_mut(slot) {
                        *flag = true;
                    }
                }
                (draft.digits(), highlighted)
            }
        }
    }
}
