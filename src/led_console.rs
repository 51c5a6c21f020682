//! Line-oriented serial LED controller, run instead of the clock when mode-select is asserted.
//!
//! Each command is one letter (case-insensitive) followed by parameters separated by spaces or
//! commas, terminated by CR:
//!
//! | Command          | Effect                                                      |
//! |------------------|-------------------------------------------------------------|
//! | `C NUMLEDS [ORD]`| configure the strip length and color order (default `GRB`)  |
//! | `D`              | describe the configuration                                  |
//! | `M`              | report the maximum LED count                                |
//! | `P IDX COLOR`    | set one pixel                                               |
//! | `R IDX`          | read one pixel as `RRGGBB`                                  |
//! | `F COLOR`        | fill every pixel                                            |
//! | `A`              | receive every pixel as raw `R G B` byte triples             |
//! | `S [COLOR]`      | show the pixels, or a solid color                           |
//! | `B [LEVEL]`      | set or report brightness                                    |
//! | `E [0|1|off|on]` | set or report echo                                          |
//! | `L`              | report the last error                                       |
//! | `V`              | report the version                                          |
//!
//! `COLOR` is hex `RRGGBB`, or a single letter (see [`letter_color`]).
//!
//! Without echo the console speaks a terse protocol for host programs: `.` when a line is
//! accepted, `>` when it has been executed, `E` on error. With echo on, typed characters are
//! echoed, errors are spelled out, and the prompt is `"\r\n> "`.
//!
//! ```
//! use embassy_time::Instant;
//! use matrix_clock::led_console::LedConsole;
//!
//! let mut console = LedConsole::new();
//! let mut out = Vec::new();
//! for byte in b"R 0\r" {
//!     out.extend_from_slice(console.receive(*byte, Instant::from_millis(0)).as_bytes());
//! }
//! assert_eq!(out, b".000000>");
//! ```

use core::fmt::{self, Write as _};

use derive_more::derive::{Display, Error};
use embassy_time::Instant;
use heapless::Vec;
use smart_leds::{RGB8, colors};

use crate::{
    config::{ARRAY_RECEIVE_TIMEOUT, LED_COUNT, STRIP_PIN},
    render::Frame,
};

/// Reported by `V` and printed at startup.
pub const VERSION: &str = "LED Controller v1.0";
/// Strip length until the first `C` command.
pub const DEFAULT_LED_COUNT: usize = 8;
/// Brightness until the first `B` command.
pub const DEFAULT_BRIGHTNESS: u8 = 20;
/// Characters kept per command line. Extra characters are dropped.
pub const LINE_CAPACITY: usize = 18;
/// Room for the longest reply to a single received byte.
pub const REPLY_CAPACITY: usize = 128;

const ECHO_PROMPT: &str = "\r\n> ";
const LINE_FEED: &str = "\r\n";

/// Console command failures. The display text is what `L` and echo mode report.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    #[display("LED count value out of range")]
    LedCountOutOfRange,
    #[display("Invalid pixel color value")]
    InvalidPixelColor,
    #[display("Pixel color param not found")]
    PixelColorMissing,
    #[display("LED index value out of range")]
    LedIndexOutOfRange,
    #[display("Invalid fill color value")]
    InvalidFillColor,
    #[display("Fill color param not found")]
    FillColorMissing,
    #[display("Invalid parameter")]
    InvalidParameter,
    #[display("Unrecognized command")]
    UnrecognizedCommand,
    #[display("Timeout during receive of array data")]
    ArrayTimeout,
}

/// The byte order the strip expects on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    #[default]
    Grb,
    Rgb,
    Rbg,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Parse a three-letter order, case-insensitive. Anything unrecognized is `GRB`.
    #[must_use]
    pub fn parse(text: &[u8]) -> Self {
        [
            Self::Grb,
            Self::Rgb,
            Self::Rbg,
            Self::Gbr,
            Self::Brg,
            Self::Bgr,
        ]
        .into_iter()
        .find(|order| order.name().as_bytes().eq_ignore_ascii_case(text))
        .unwrap_or_default()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grb => "GRB",
            Self::Rgb => "RGB",
            Self::Rbg => "RBG",
            Self::Gbr => "GBR",
            Self::Brg => "BRG",
            Self::Bgr => "BGR",
        }
    }

    /// Rearrange `color` so a GRB driver puts this order's bytes on the wire.
    #[must_use]
    pub const fn to_grb_driver(self, color: RGB8) -> RGB8 {
        let RGB8 {
            r: red,
            g: green,
            b: blue,
        } = color;
        let [first, second, third] = match self {
            Self::Grb => [green, red, blue],
            Self::Rgb => [red, green, blue],
            Self::Rbg => [red, blue, green],
            Self::Gbr => [green, blue, red],
            Self::Brg => [blue, red, green],
            Self::Bgr => [blue, green, red],
        };
        RGB8::new(second, first, third)
    }
}

/// Bytes to send back, and whether the strip must be refreshed from [`LedConsole::shown`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Reply {
    bytes: Vec<u8, REPLY_CAPACITY>,
    show: bool,
}

impl Reply {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub const fn show(&self) -> bool {
        self.show
    }

    /// True if there is nothing to send and nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && !self.show
    }

    fn push(&mut self, byte: u8) {
        // Capacity covers the longest reply.
        let _ = self.bytes.push(byte);
    }

    fn push_str(&mut self, text: &str) {
        let _ = self.bytes.extend_from_slice(text.as_bytes());
    }
}

impl fmt::Write for Reply {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.bytes
            .extend_from_slice(text.as_bytes())
            .map_err(|()| fmt::Error)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ArrayReceive {
    next_index: usize,
    triple: [u8; 3],
    filled: usize,
    started: Instant,
}

/// Console state: the pixel buffer, strip configuration, and the partial input line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedConsole {
    pixels: [RGB8; LED_COUNT],
    led_count: usize,
    color_order: ColorOrder,
    brightness: u8,
    echo: bool,
    initialized: bool,
    last_error: Option<ConsoleError>,
    line: Vec<u8, LINE_CAPACITY>,
    array: Option<ArrayReceive>,
    shown: Frame<LED_COUNT>,
}

impl Default for LedConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl LedConsole {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [RGB8::new(0, 0, 0); LED_COUNT],
            led_count: DEFAULT_LED_COUNT,
            color_order: ColorOrder::Grb,
            brightness: DEFAULT_BRIGHTNESS,
            echo: false,
            initialized: false,
            last_error: None,
            line: Vec::new(),
            array: None,
            shown: Frame::new(),
        }
    }

    /// Version line and first prompt, sent once at startup.
    #[must_use]
    pub fn banner(&self) -> Reply {
        let mut reply = Reply::default();
        reply.push_str(VERSION);
        self.prompt(&mut reply);
        reply
    }

    #[must_use]
    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    #[must_use]
    pub const fn color_order(&self) -> ColorOrder {
        self.color_order
    }

    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    #[must_use]
    pub const fn echo(&self) -> bool {
        self.echo
    }

    #[must_use]
    pub const fn last_error(&self) -> Option<ConsoleError> {
        self.last_error
    }

    /// The stored color of pixel `index`, in RGB order.
    #[must_use]
    pub fn pixel(&self, index: usize) -> Option<RGB8> {
        self.pixels.get(index).copied()
    }

    /// True while raw pixel data from an `A` command is expected.
    #[must_use]
    pub const fn is_receiving_array(&self) -> bool {
        self.array.is_some()
    }

    /// What the strip should currently display, already in driver byte order.
    #[must_use]
    pub const fn shown(&self) -> &Frame<LED_COUNT> {
        &self.shown
    }

    /// Handle one byte received at `now`.
    pub fn receive(&mut self, byte: u8, now: Instant) -> Reply {
        let mut reply = self.expire(now);

        if let Some(array) = &mut self.array {
            if let Some(slot) = array.triple.get_mut(array.filled) {
                *slot = byte;
            }
            array.filled = array.filled.saturating_add(1);
            if array.filled == array.triple.len() {
                let [red, green, blue] = array.triple;
                if let Some(pixel) = self.pixels.get_mut(array.next_index) {
                    *pixel = RGB8::new(red, green, blue);
                }
                array.filled = 0;
                array.next_index = array.next_index.saturating_add(1);
                if array.next_index >= self.led_count {
                    self.array = None;
                    self.prompt(&mut reply);
                }
            }
        } else if byte == b'\r' {
            if !self.line.is_empty() {
                reply.push(b'.');
                let line = core::mem::take(&mut self.line);
                self.execute(&line, now, &mut reply);
            }
            self.prompt(&mut reply);
        } else if byte >= b' ' && self.line.push(byte).is_ok() && self.echo {
            reply.push(byte);
        }

        reply
    }

    /// Abandon an `A` transfer that has run longer than the receive timeout.
    pub fn expire(&mut self, now: Instant) -> Reply {
        let mut reply = Reply::default();
        if let Some(array) = self.array
            && now.saturating_duration_since(array.started) > ARRAY_RECEIVE_TIMEOUT
        {
            self.array = None;
            self.report(ConsoleError::ArrayTimeout, &mut reply);
        }
        reply
    }

    fn execute(&mut self, line: &[u8], now: Instant, reply: &mut Reply) {
        let Some((command, rest)) = line.split_first() else {
            return;
        };
        let params = rest
            .iter()
            .position(|byte| *byte != b' ')
            .and_then(|start| rest.get(start..))
            .unwrap_or_default();

        let result = match command.to_ascii_uppercase() {
            b'C' => self.configure(params),
            b'D' => {
                self.describe(reply);
                Ok(())
            }
            b'M' => {
                self.answer(reply, format_args!("{LED_COUNT}"));
                Ok(())
            }
            b'P' => self.set_pixel(params),
            b'R' => self.read_pixel(params, reply),
            b'F' => self.fill(params),
            b'A' => {
                self.array = Some(ArrayReceive {
                    next_index: 0,
                    triple: [0; 3],
                    filled: 0,
                    started: now,
                });
                Ok(())
            }
            b'S' => self.show(params, reply),
            b'B' => {
                self.set_brightness(params, reply);
                Ok(())
            }
            b'E' => self.set_echo(params, reply),
            b'L' => {
                match self.last_error {
                    Some(error) => self.answer(reply, format_args!("{error}")),
                    None => self.answer(reply, format_args!("")),
                }
                Ok(())
            }
            b'V' => {
                self.answer(reply, format_args!("{VERSION}"));
                Ok(())
            }
            _ => Err(ConsoleError::UnrecognizedCommand),
        };

        if let Err(error) = result {
            self.report(error, reply);
        }
    }

    fn configure(&mut self, params: &[u8]) -> Result<(), ConsoleError> {
        if params.is_empty() {
            return Ok(());
        }
        let count = usize::try_from(atoi(params))
            .ok()
            .filter(|count| (1..=LED_COUNT).contains(count))
            .ok_or(ConsoleError::LedCountOutOfRange)?;
        self.led_count = count;
        if let Some(order) = second_param(params) {
            self.color_order = ColorOrder::parse(order);
        }
        self.initialized = true;
        Ok(())
    }

    fn describe(&self, reply: &mut Reply) {
        self.answer(
            reply,
            format_args!(
                "NumLEDs={} ClrOrder={} LEDPin={} Bright={}",
                self.led_count,
                self.color_order.name(),
                STRIP_PIN,
                self.brightness
            ),
        );
    }

    fn set_pixel(&mut self, params: &[u8]) -> Result<(), ConsoleError> {
        if params.is_empty() {
            return Ok(());
        }
        let index = self.led_index(params)?;
        let color = second_param(params).ok_or(ConsoleError::PixelColorMissing)?;
        let color = parse_color(color).ok_or(ConsoleError::InvalidPixelColor)?;
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
        Ok(())
    }

    fn read_pixel(&self, params: &[u8], reply: &mut Reply) -> Result<(), ConsoleError> {
        if params.is_empty() {
            return Ok(());
        }
        let index = self.led_index(params)?;
        let RGB8 {
            r: red,
            g: green,
            b: blue,
        } = self.pixel(index).unwrap_or_default();
        self.answer(reply, format_args!("{red:02X}{green:02X}{blue:02X}"));
        Ok(())
    }

    fn fill(&mut self, params: &[u8]) -> Result<(), ConsoleError> {
        if params.is_empty() {
            return Err(ConsoleError::FillColorMissing);
        }
        let color = parse_color(params).ok_or(ConsoleError::InvalidFillColor)?;
        let led_count = self.led_count;
        self.pixels
            .iter_mut()
            .take(led_count)
            .for_each(|pixel| *pixel = color);
        Ok(())
    }

    fn show(&mut self, params: &[u8], reply: &mut Reply) -> Result<(), ConsoleError> {
        let solid = if params.is_empty() {
            None
        } else {
            Some(parse_color(params).ok_or(ConsoleError::InvalidPixelColor)?)
        };
        self.initialized = true;
        self.present(solid, reply);
        Ok(())
    }

    fn set_brightness(&mut self, params: &[u8], reply: &mut Reply) {
        if params.is_empty() {
            self.answer(reply, format_args!("{}", self.brightness));
            return;
        }
        // Only the low byte of the parsed value is kept.
        let [low, ..] = atoi(params).to_le_bytes();
        self.brightness = low;
        if self.initialized {
            self.present(None, reply);
        }
    }

    fn set_echo(&mut self, params: &[u8], reply: &mut Reply) -> Result<(), ConsoleError> {
        self.echo = match params {
            [] => {
                let flag = if self.echo { "1" } else { "0" };
                self.answer(reply, format_args!("{flag}"));
                return Ok(());
            }
            [b'0', ..] => false,
            [b'1', ..] => true,
            _ if params.eq_ignore_ascii_case(b"off") => false,
            _ if params.eq_ignore_ascii_case(b"on") => true,
            _ => return Err(ConsoleError::InvalidParameter),
        };
        Ok(())
    }

    fn led_index(&self, params: &[u8]) -> Result<usize, ConsoleError> {
        usize::try_from(atoi(params))
            .ok()
            .filter(|index| *index < self.led_count)
            .ok_or(ConsoleError::LedIndexOutOfRange)
    }

    fn present(&mut self, solid: Option<RGB8>, reply: &mut Reply) {
        self.shown.clear();
        self.shown.set_brightness(self.brightness);
        for (index, pixel) in self.pixels.iter().take(self.led_count).enumerate() {
            self.shown
                .set(index, self.color_order.to_grb_driver(solid.unwrap_or(*pixel)));
        }
        reply.show = true;
    }

    /// Write a query result, on its own line when echo is on.
    fn answer(&self, reply: &mut Reply, args: fmt::Arguments<'_>) {
        if self.echo {
            reply.push_str(LINE_FEED);
        }
        let _ = reply.write_fmt(args);
    }

    fn report(&mut self, error: ConsoleError, reply: &mut Reply) {
        self.last_error = Some(error);
        if self.echo {
            reply.push_str(LINE_FEED);
            let _ = write!(reply, "{error}");
        } else {
            reply.push(b'E');
        }
    }

    fn prompt(&self, reply: &mut Reply) {
        if self.echo {
            reply.push_str(ECHO_PROMPT);
        } else {
            reply.push(b'>');
        }
    }
}

/// The color named by a single letter (case-insensitive), or black for unknown letters.
///
/// `R` red, `G` green, `B` blue, `Y` yellow, `W` white, `O` orange, `V` violet, `P` pink,
/// `M` magenta, `C` cyan, `T` teal, `A` gray, `N` brown.
#[must_use]
pub const fn letter_color(letter: u8) -> RGB8 {
    match letter.to_ascii_uppercase() {
        b'R' => colors::RED,
        b'G' => colors::GREEN,
        b'B' => colors::BLUE,
        b'Y' => colors::YELLOW,
        b'W' => colors::WHITE,
        b'O' => colors::ORANGE,
        b'V' => colors::VIOLET,
        b'P' => colors::PINK,
        b'M' => colors::MAGENTA,
        b'C' => colors::CYAN,
        b'T' => colors::TEAL,
        b'A' => colors::GRAY,
        b'N' => colors::BROWN,
        _ => colors::BLACK,
    }
}

/// Parse a `COLOR` parameter. Black is only accepted when spelled starting with `0`.
fn parse_color(param: &[u8]) -> Option<RGB8> {
    let color = match param {
        [letter] => letter_color(*letter),
        _ => parse_hex(param),
    };
    (color != colors::BLACK || param.first() == Some(&b'0')).then_some(color)
}

/// Leading hexadecimal number (optional sign and `0x`), masked to 24 bits. Garbage parses as 0.
fn parse_hex(text: &[u8]) -> RGB8 {
    let (negative, digits) = split_sign(text);
    let digits = match digits {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => digits,
    };
    let magnitude = digits
        .iter()
        .map_while(|byte| char::from(*byte).to_digit(16))
        .fold(0u32, |value, digit| {
            value.saturating_mul(16).saturating_add(digit)
        });
    let value = if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    };
    let [_, red, green, blue] = (value & 0x00FF_FFFF).to_be_bytes();
    RGB8::new(red, green, blue)
}

/// Leading decimal integer, C `atoi` style: whitespace and sign allowed, stops at the first
/// non-digit, `0` when there are no digits.
fn atoi(text: &[u8]) -> i32 {
    let (negative, digits) = split_sign(text);
    let magnitude = digits
        .iter()
        .take_while(|byte| byte.is_ascii_digit())
        .fold(0i32, |value, digit| {
            value
                .wrapping_mul(10)
                .wrapping_add(i32::from(digit.wrapping_sub(b'0')))
        });
    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

fn split_sign(text: &[u8]) -> (bool, &[u8]) {
    let trimmed = text.trim_ascii_start();
    match trimmed {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, trimmed),
    }
}

const fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b',')
}

/// The text after the first parameter and its separators, if any remains.
fn second_param(params: &[u8]) -> Option<&[u8]> {
    let first_end = params
        .iter()
        .position(|byte| is_separator(*byte))
        .unwrap_or(params.len());
    let rest = params.get(first_end..)?;
    let start = rest.iter().position(|byte| !is_separator(*byte))?;
    rest.get(start..)
}
