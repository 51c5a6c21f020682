use derive_more::derive::{Display, Error};
use embedded_hal::i2c::ErrorKind;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// The real-time clock did not answer at boot.
    #[display("Couldn't find RTC")]
    ClockNotFound,

    /// An I2C transfer to the real-time clock failed.
    // `embedded_hal::i2c::ErrorKind` does not implement `core::error::Error`, so it is not a
    // `source`.
    #[display("I2C transfer failed: {_0:?}")]
    I2c(#[error(not(source))] ErrorKind),

    /// The real-time clock returned register contents that are not a valid time.
    #[display("RTC returned an invalid time")]
    InvalidTime,

    /// An internal flash operation failed.
    #[cfg(all(feature = "pico1", not(feature = "host")))]
    #[display("Flash operation failed: {_0:?}")]
    Flash(#[error(not(source))] embassy_rp::flash::Error),

    /// Writing to the console UART failed.
    #[cfg(all(feature = "pico1", not(feature = "host")))]
    #[display("UART write failed: {_0:?}")]
    Uart(#[error(not(source))] embassy_rp::uart::Error),
}

