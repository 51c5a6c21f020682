//! An 8×40 LED-matrix clock: digit rendering, serpentine addressing, and a three-button menu.
//!
//! The clock logic (everything except [`hardware`], [`led_strip`], and [`settings_store`]'s flash
//! backend) is pure and runs on the host. See [`ClockController`] for the per-tick entry point.
#![no_std]

pub mod button;
pub mod clock_controller;
pub mod config;
pub mod ds3231;
mod error;
pub mod font;
pub mod led_console;
pub mod led_layout;
pub mod menu;
pub mod render;
pub mod settings;
pub mod settings_store;
pub mod time_of_day;

#[cfg(all(feature = "pico1", not(feature = "host")))]
pub mod hardware;
#[cfg(all(feature = "pico1", not(feature = "host")))]
pub mod led_strip;

// Re-export commonly used items
pub use button::{Buttons, ButtonEvent, Key, Level, PressDuration};
pub use clock_controller::{ClockController, TickInput, TickOutcome};
pub use ds3231::{ClockSource, DateTime, Ds3231};
pub use error::{Error, Result};
pub use menu::{DisplayField, Menu, Mode, TimeField};
pub use render::Frame;
pub use settings::{Direction, Orientation, Settings};
pub use settings_store::SettingsStore;
pub use time_of_day::TimeOfDay;
