//! 24-hour time of day as shown on the clock.

use crate::{menu::TimeField, settings::Direction};

/// Hours, minutes, and seconds of a 24-hour day.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Build a time, or `None` if any field is out of range.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < TimeField::Hours.limit()
            && minute < TimeField::Minutes.limit()
            && second < TimeField::Seconds.limit()
        {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// The value of one field.
    #[must_use]
    pub const fn field(&self, field: TimeField) -> u8 {
        match field {
            TimeField::Seconds => self.second,
            TimeField::Minutes => self.minute,
            TimeField::Hours => self.hour,
        }
    }

    /// Step one field up or down, wrapping at its limit. Other fields are left alone, so
    /// 59 seconds stepped up becomes 0 seconds without carrying into the minutes.
    pub const fn adjust(&mut self, field: TimeField, direction: Direction) {
        let value = wrap_step(self.field(field), field.limit(), direction);
        match field {
            TimeField::Seconds => self.second = value,
            TimeField::Minutes => self.minute = value,
            TimeField::Hours => self.hour = value,
        }
    }

    /// The six displayed digits, `HHMMSS`.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Division and modulo by 10 of values below 60"
    )]
    pub const fn digits(&self) -> [u8; 6] {
        [
            self.hour / 10,
            self.hour % 10,
            self.minute / 10,
            self.minute % 10,
            self.second / 10,
            self.second % 10,
        ]
    }
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "value < limit, checked before each step"
)]
const fn wrap_step(value: u8, limit: u8, direction: Direction) -> u8 {
    match direction {
        Direction::Up if value + 1 >= limit => 0,
        Direction::Up => value + 1,
        Direction::Down if value == 0 => limit - 1,
        Direction::Down => value - 1,
    }
}
