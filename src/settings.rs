//! Display settings (color, brightness, orientation), their one-byte persisted form, and the
//! deferred-write tracker.

use embassy_time::{Duration, Instant};
use smart_leds::RGB8;

use crate::config::{BRIGHTNESS_LEVELS, COLOR_COUNT, LEVEL_COUNT, PALETTE};

/// Which way up the matrix is mounted.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    #[default]
    Normal,
    /// Turned 180°.
    Rotated,
}

impl Orientation {
    /// The other orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Normal => Self::Rotated,
            Self::Rotated => Self::Normal,
        }
    }
}

/// Direction of a +/- adjustment.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

/// User-adjustable display settings.
///
/// `color_index` and `brightness_level` index into [`PALETTE`] and [`BRIGHTNESS_LEVELS`] and are
/// always in range.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    color_index: u8,
    brightness_level: u8,
    orientation: Orientation,
}

impl Settings {
    /// Build settings, resetting an out-of-range color or level to 0.
    #[must_use]
    pub const fn new(color_index: u8, brightness_level: u8, orientation: Orientation) -> Self {
        Self {
            color_index: if color_index < COLOR_COUNT {
                color_index
            } else {
                0
            },
            brightness_level: if brightness_level < LEVEL_COUNT {
                brightness_level
            } else {
                0
            },
            orientation,
        }
    }

    /// Decode the persisted byte: bits 7..4 color, bits 3..1 level, bit 0 orientation.
    ///
    /// Any byte decodes; out-of-range fields (such as erased storage) fall back to 0.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        let orientation = if byte & 0x01 == 0 {
            Orientation::Normal
        } else {
            Orientation::Rotated
        };
        Self::new((byte & 0xF0) >> 4, (byte & 0x0F) >> 1, orientation)
    }

    /// Encode into the persisted byte.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        let orientation_bit = match self.orientation {
            Orientation::Normal => 0,
            Orientation::Rotated => 1,
        };
        (self.color_index << 4) | (self.brightness_level << 1) | orientation_bit
    }

    #[must_use]
    pub const fn color_index(&self) -> u8 {
        self.color_index
    }

    #[must_use]
    pub const fn brightness_level(&self) -> u8 {
        self.brightness_level
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The selected digit color.
    #[must_use]
    pub fn color(&self) -> RGB8 {
        palette_color(self.color_index)
    }

    /// The cursor color: the palette entry half the palette away from the selected color.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "color_index < COLOR_COUNT, so the sum cannot overflow u8"
    )]
    pub fn highlight_color(&self) -> RGB8 {
        palette_color((self.color_index + COLOR_COUNT / 2) % COLOR_COUNT)
    }

    /// The global brightness scalar for the LED driver.
    #[must_use]
    pub fn brightness(&self) -> u8 {
        BRIGHTNESS_LEVELS
            .get(usize::from(self.brightness_level))
            .copied()
            .unwrap_or(BRIGHTNESS_LEVELS[0])
    }

    /// Step the color, wrapping around the palette.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "color_index < COLOR_COUNT, checked before each step"
    )]
    pub const fn adjust_color(&mut self, direction: Direction) {
        self.color_index = match direction {
            Direction::Up if self.color_index + 1 >= COLOR_COUNT => 0,
            Direction::Up => self.color_index + 1,
            Direction::Down if self.color_index == 0 => COLOR_COUNT - 1,
            Direction::Down => self.color_index - 1,
        };
    }

    /// Step the brightness level, stopping at the dimmest and brightest levels.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "bounds are checked before each step"
    )]
    pub const fn adjust_brightness(&mut self, direction: Direction) {
        match direction {
            Direction::Up if self.brightness_level + 1 < LEVEL_COUNT => {
                self.brightness_level += 1;
            }
            Direction::Down if self.brightness_level > 0 => self.brightness_level -= 1,
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.flipped();
    }
}

fn palette_color(index: u8) -> RGB8 {
    PALETTE
        .get(usize::from(index))
        .copied()
        .unwrap_or(PALETTE[0])
}

/// Coalesces bursts of settings changes into one persistent write.
///
/// Every change restarts the quiet window; [`SaveTracker::due`] reports when the window has
/// passed with no further change.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SaveTracker {
    last_change: Option<Instant>,
}

impl SaveTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_change: None }
    }

    /// Record a change made at `now`.
    pub const fn mark_changed(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// True if there are unsaved changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    /// True if there are unsaved changes and more than `quiet` has passed since the last one.
    #[must_use]
    pub fn due(&self, now: Instant, quiet: Duration) -> bool {
        self.last_change
            .is_some_and(|last_change| now.saturating_duration_since(last_change) > quiet)
    }

    /// Forget pending changes after they were written.
    pub const fn clear(&mut self) {
        self.last_change = None;
    }
}
