//! The clock source: a DS3231 real-time clock on I2C.
//!
//! The DS3231 keeps time in BCD registers `0x00..=0x06` (seconds, minutes, hours, weekday, date,
//! month, year). Bit 7 of the status register `0x0F` is the oscillator-stop flag, set when the
//! chip lost its backup supply; writing a new time clears it.

use embedded_hal::i2c::{Error as _, I2c};

use crate::{Error, Result, time_of_day::TimeOfDay};

/// 7-bit I2C address of the DS3231.
pub const DS3231_ADDRESS: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_STATUS: u8 = 0x0F;
const STATUS_OSCILLATOR_STOPPED: u8 = 0x80;
const HOUR_12_MODE: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const MONTH_CENTURY: u8 = 0x80;

/// A calendar date and time of day as kept by the clock source.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    time: TimeOfDay,
}

impl DateTime {
    /// The first instant of 2024-01-01, used to seed a clock that lost power.
    pub const REFERENCE: Self = Self::on_reference_day(TimeOfDay::MIDNIGHT);

    /// `time` on 2024-01-01. Only the time of day matters to the clock, so edited times are
    /// committed on this fixed day.
    #[must_use]
    pub const fn on_reference_day(time: TimeOfDay) -> Self {
        Self {
            year: 2024,
            month: 1,
            day: 1,
            time,
        }
    }

    /// Build a date-time in 2000..=2099, or `None` if the date is out of range.
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8, time: TimeOfDay) -> Option<Self> {
        if year >= 2000
            && year <= 2099
            && month >= 1
            && month <= 12
            && day >= 1
            && day <= days_in_month(year, month)
        {
            Some(Self {
                year,
                month,
                day,
                time,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Day of the week in the DS3231's numbering: Monday = 1 … Sunday = 7.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        clippy::cast_possible_truncation,
        reason = "Bounded calendar arithmetic for years 2000..=2099"
    )]
    pub const fn weekday(&self) -> u8 {
        // 2000-01-01 was a Saturday (6 in Monday = 1 numbering).
        let mut days: u32 = 0;
        let mut year = 2000;
        while year < self.year {
            days += if is_leap_year(year) { 366 } else { 365 };
            year += 1;
        }
        let mut month = 1;
        while month < self.month {
            days += days_in_month(self.year, month) as u32;
            month += 1;
        }
        days += self.day as u32 - 1;
        ((days + 5) % 7 + 1) as u8
    }
}

#[expect(
    clippy::integer_division_remainder_used,
    reason = "Leap-year rule needs modulo"
)]
const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Supplies the current time and accepts a new one.
pub trait ClockSource {
    /// Check that the clock is present. Failure at boot is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockNotFound`] if the clock does not answer.
    fn begin(&mut self) -> Result<()>;

    /// True if the clock stopped since its time was last set.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock cannot be read.
    fn lost_power(&mut self) -> Result<bool>;

    /// The current date and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock cannot be read or holds an invalid time.
    fn now(&mut self) -> Result<DateTime>;

    /// Set the date and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock cannot be written.
    fn adjust(&mut self, date_time: DateTime) -> Result<()>;
}

/// A change in whether the clock source can be read.
#[derive(Debug)]
pub enum ReadChange {
    /// The first failed read after a good one.
    Failed(Error),
    /// The first good read after a failed one.
    Recovered,
}

/// The last good time of day read from a clock source.
///
/// Failed reads keep the previous time and are reported once per outage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClockReading {
    time: TimeOfDay,
    readable: bool,
}

impl Default for ClockReading {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockReading {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time: TimeOfDay::MIDNIGHT,
            readable: true,
        }
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.readable
    }

    /// Fold in one read, returning a change only on the transition.
    pub fn update(&mut self, read: Result<DateTime>) -> Option<ReadChange> {
        let was_readable = self.readable;
        match read {
            Ok(date_time) => {
                self.time = date_time.time();
                self.readable = true;
                (!was_readable).then_some(ReadChange::Recovered)
            }
            Err(err) => {
                self.readable = false;
                was_readable.then_some(ReadChange::Failed(err))
            }
        }
    }
}

/// DS3231 driver over any `embedded-hal` I2C bus.
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    #[must_use]
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDRESS, &[register], &mut buffer)
            .map_err(|err| Error::I2c(err.kind()))?;
        let [value] = buffer;
        Ok(value)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.i2c
            .write(DS3231_ADDRESS, &[register, value])
            .map_err(|err| Error::I2c(err.kind()))
    }
}

impl<I2C: I2c> ClockSource for Ds3231<I2C> {
    fn begin(&mut self) -> Result<()> {
        self.read_register(REG_STATUS)
            .map(|_| ())
            .map_err(|_| Error::ClockNotFound)
    }

    fn lost_power(&mut self) -> Result<bool> {
        Ok(self.read_register(REG_STATUS)? & STATUS_OSCILLATOR_STOPPED != 0)
    }

    fn now(&mut self) -> Result<DateTime> {
        let mut registers = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDRESS, &[REG_SECONDS], &mut registers)
            .map_err(|err| Error::I2c(err.kind()))?;
        decode_registers(registers)
    }

    fn adjust(&mut self, date_time: DateTime) -> Result<()> {
        let [seconds, minutes, hours, weekday, date, month, year] = encode_registers(&date_time);
        let message = [REG_SECONDS, seconds, minutes, hours, weekday, date, month, year];
        self.i2c
            .write(DS3231_ADDRESS, &message)
            .map_err(|err| Error::I2c(err.kind()))?;

        let status = self.read_register(REG_STATUS)?;
        self.write_register(REG_STATUS, status & !STATUS_OSCILLATOR_STOPPED)
    }
}

/// Decode the seven time registers. Handles both 24-hour and 12-hour register modes.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] if the registers do not hold a valid date and time.
#[expect(
    clippy::arithmetic_side_effects,
    reason = "BCD values are range-checked before use"
)]
pub fn decode_registers(registers: [u8; 7]) -> Result<DateTime> {
    let [seconds, minutes, hours, _weekday, date, month, year] = registers;

    let hour = if hours & HOUR_12_MODE == 0 {
        bcd_to_bin(hours & 0x3F)
    } else {
        let hour12 = bcd_to_bin(hours & 0x1F);
        if !(1..=12).contains(&hour12) {
            return Err(Error::InvalidTime);
        }
        let pm = hours & HOUR_PM != 0;
        match (hour12, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (hour12, false) => hour12,
            (hour12, true) => hour12 + 12,
        }
    };

    let time = TimeOfDay::new(hour, bcd_to_bin(minutes & 0x7F), bcd_to_bin(seconds & 0x7F))
        .ok_or(Error::InvalidTime)?;
    let year = 2000 + u16::from(bcd_to_bin(year));
    DateTime::new(year, bcd_to_bin(month & !MONTH_CENTURY), bcd_to_bin(date & 0x3F), time)
        .ok_or(Error::InvalidTime)
}

/// Encode a date-time into the seven time registers, 24-hour mode.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    reason = "DateTime years are 2000..=2099"
)]
pub const fn encode_registers(date_time: &DateTime) -> [u8; 7] {
    let time = date_time.time();
    [
        bin_to_bcd(time.second()),
        bin_to_bcd(time.minute()),
        bin_to_bcd(time.hour()),
        date_time.weekday(),
        bin_to_bcd(date_time.day()),
        bin_to_bcd(date_time.month()),
        bin_to_bcd((date_time.year() - 2000) as u8),
    ]
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "Each nibble is at most 15"
)]
const fn bcd_to_bin(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "value < 100"
)]
const fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
