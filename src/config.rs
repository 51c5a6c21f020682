//! Compile-time configuration for the 8×40 matrix clock.
//!
//! Pin assignments (Raspberry Pi Pico):
//!
//! | Signal          | GPIO | Notes                              |
//! |-----------------|------|------------------------------------|
//! | LED strip data  | 3    | WS2811/WS2812, GRB                 |
//! | Menu button     | 20   | active-low, pull-up                |
//! | Minus button    | 21   | active-low, pull-up                |
//! | Plus button     | 22   | active-low, pull-up                |
//! | Mode select     | 26   | low at boot disables the clock     |
//! | RTC SDA / SCL   | 4/5  | I2C0, DS3231 at `0x68`             |
//! | Console TX / RX | 0/1  | UART0, 115200 baud                 |
//! | Status LED      | 25   | on-board LED                       |

use embassy_time::Duration;
use smart_leds::{RGB8, colors};

/// Rows in the LED matrix (the height of one glyph).
pub const ROWS: usize = 8;
/// Columns in the LED matrix.
pub const COLS: usize = 40;
/// Total LEDs on the strip.
pub const LED_COUNT: usize = ROWS * COLS;

/// Number of digit slots (HH:MM:SS).
pub const SLOT_COUNT: usize = 6;
/// Left-most column of each digit slot. The gaps at 11..14 and 25..28 separate the fields.
pub const SLOT_BASES: [usize; SLOT_COUNT] = [0, 6, 14, 20, 28, 34];

/// Selectable digit colors. The highlight cursor uses the color half the palette away.
pub const PALETTE: [RGB8; 8] = [
    colors::RED,
    colors::ORANGE_RED,
    colors::ORANGE,
    colors::GREEN,
    colors::DARK_CYAN,
    colors::BLUE,
    colors::DEEP_PINK,
    colors::GRAY,
];
/// Number of entries in [`PALETTE`].
#[expect(clippy::cast_possible_truncation, reason = "Eight colors")]
pub const COLOR_COUNT: u8 = PALETTE.len() as u8;

/// Global brightness scalars, dimmest first.
pub const BRIGHTNESS_LEVELS: [u8; 6] = [1, 2, 4, 8, 16, 32];
/// Number of entries in [`BRIGHTNESS_LEVELS`].
#[expect(clippy::cast_possible_truncation, reason = "Six levels")]
pub const LEVEL_COUNT: u8 = BRIGHTNESS_LEVELS.len() as u8;

/// Minimum time between two accepted presses of the same button.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);
/// How long a press must be sustained before it counts as a hold.
pub const HOLD_WINDOW: Duration = Duration::from_millis(1000);
/// Quiet time after the last settings change before the settings byte is written.
pub const SAVE_QUIET_WINDOW: Duration = Duration::from_millis(2000);
/// Control-loop sleep between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);
/// Settling pause after configuring the mode-select pull-up.
pub const MODE_PIN_SETTLE: Duration = Duration::from_millis(100);
/// Status LED on-time at boot.
pub const STARTUP_BLINK: Duration = Duration::from_millis(500);
/// Half-period of the "settings saved" blink.
pub const SAVED_BLINK: Duration = Duration::from_millis(100);
/// Number of blinks after a settings write.
pub const SAVED_BLINK_COUNT: u8 = 3;

/// GPIO number of the LED strip data line, reported by the console's `D` command.
pub const STRIP_PIN: u8 = 3;

/// Serial baud rate of the LED console.
pub const CONSOLE_BAUD_RATE: u32 = 115_200;
/// How long the LED console waits for the pixel data of an `A` command.
pub const ARRAY_RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);
/// How often the idle LED console checks for an expired `A` transfer.
pub const CONSOLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A very long sleep used by halted and disabled states.
pub const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);
