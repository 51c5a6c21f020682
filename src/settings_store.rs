//! Persistence for the packed settings byte.
//!
//! On the Pico the byte lives in the last sector of internal flash, framed as a four-byte
//! record: a two-byte magic, the byte, and its complement. A sector that does not hold a valid
//! record (erased, or never written) loads as `0`, the all-defaults settings byte.

use crate::Result;

/// Reads and writes the single persisted settings byte.
pub trait SettingsStore {
    /// The stored byte, or `0` if nothing valid was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&mut self) -> Result<u8>;

    /// Replace the stored byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, byte: u8) -> Result<()>;
}

const MAGIC: [u8; 2] = *b"MC";

/// Length of a settings record in flash.
pub const RECORD_LEN: usize = 4;

/// Frame `byte` as a flash record.
#[must_use]
pub const fn encode_record(byte: u8) -> [u8; RECORD_LEN] {
    let [first, second] = MAGIC;
    [first, second, byte, !byte]
}

/// Extract the settings byte from a flash record, or `None` if the record is not valid.
#[must_use]
pub const fn decode_record(record: [u8; RECORD_LEN]) -> Option<u8> {
    let [first, second, byte, complement] = record;
    let [magic_first, magic_second] = MAGIC;
    if first == magic_first && second == magic_second && byte == !complement {
        Some(byte)
    } else {
        None
    }
}

#[cfg(all(feature = "pico1", not(feature = "host")))]
pub use flash::{FlashSettingsStore, INTERNAL_FLASH_SIZE};

#[cfg(all(feature = "pico1", not(feature = "host")))]
mod flash {
    use defmt::info;
    use embassy_rp::flash::{Blocking, ERASE_SIZE, Flash, Instance};

    use super::{RECORD_LEN, SettingsStore, decode_record, encode_record};
    use crate::{Error, Result};

    /// Size of the Pico's internal flash.
    pub const INTERNAL_FLASH_SIZE: usize = 2 * 1024 * 1024;

    /// [`SettingsStore`] backed by the last sector of internal flash.
    pub struct FlashSettingsStore<'d, T: Instance> {
        flash: Flash<'d, T, Blocking, INTERNAL_FLASH_SIZE>,
    }

    impl<'d, T: Instance> FlashSettingsStore<'d, T> {
        #[must_use]
        pub const fn new(flash: Flash<'d, T, Blocking, INTERNAL_FLASH_SIZE>) -> Self {
            Self { flash }
        }

        #[expect(
            clippy::arithmetic_side_effects,
            clippy::cast_possible_truncation,
            reason = "Flash capacity is far below u32::MAX and at least one sector"
        )]
        fn sector_offset(&self) -> u32 {
            (self.flash.capacity() - ERASE_SIZE) as u32
        }
    }

    impl<T: Instance> SettingsStore for FlashSettingsStore<'_, T> {
        fn load(&mut self) -> Result<u8> {
            let offset = self.sector_offset();
            let mut record = [0u8; RECORD_LEN];
            self.flash
                .blocking_read(offset, &mut record)
                .map_err(Error::Flash)?;
            match decode_record(record) {
                Some(byte) => {
                    info!("Settings loaded: {=u8:#04x}", byte);
                    Ok(byte)
                }
                None => {
                    info!("No saved settings; using defaults");
                    Ok(0)
                }
            }
        }

        #[expect(
            clippy::arithmetic_side_effects,
            clippy::cast_possible_truncation,
            reason = "One sector past a sector-aligned offset stays in range"
        )]
        fn save(&mut self, byte: u8) -> Result<()> {
            let offset = self.sector_offset();
            self.flash
                .blocking_erase(offset, offset + ERASE_SIZE as u32)
                .map_err(Error::Flash)?;
            self.flash
                .blocking_write(offset, &encode_record(byte))
                .map_err(Error::Flash)?;
            info!("Settings saved: {=u8:#04x}", byte);
            Ok(())
        }
    }
}
