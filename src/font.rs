//! The 5×8 digit font.
//!
//! Each glyph is five column bytes, left to right. Bit `y` of a column byte is row `y` of the
//! glyph, least-significant bit first.

/// Glyph width in columns.
pub const GLYPH_COLS: usize = 5;
/// Glyph height in rows.
pub const GLYPH_ROWS: usize = 8;

/// Column bitmaps for the digits 0–9.
pub const DIGIT_FONT: [[u8; GLYPH_COLS]; 10] = [
    [0x7E, 0x81, 0x81, 0x81, 0x7E],
    [0x00, 0x41, 0xFF, 0x01, 0x00],
    [0x41, 0x83, 0x85, 0x89, 0x71],
    [0x42, 0x81, 0x91, 0x91, 0x6E],
    [0x0C, 0x14, 0x24, 0x44, 0xFF],
    [0xF2, 0x91, 0x91, 0x91, 0x8E],
    [0x3E, 0x51, 0x91, 0x91, 0x0E],
    [0x80, 0x83, 0x8C, 0xB0, 0xC0],
    [0x6E, 0x91, 0x91, 0x91, 0x6E],
    [0x70, 0x89, 0x89, 0x8A, 0x7C],
];

/// A single digit's bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph([u8; GLYPH_COLS]);

impl Glyph {
    /// Look up the glyph for `digit`. Values above 9 fold to their units digit.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::indexing_slicing,
        reason = "digit % 10 is always a valid font index"
    )]
    pub const fn for_digit(digit: u8) -> Self {
        Self(DIGIT_FONT[(digit % 10) as usize])
    }

    /// True if the pixel at (`column`, `row`) is lit. Out-of-glyph coordinates are never lit.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "row < GLYPH_ROWS keeps the shift inside a u8"
    )]
    pub fn is_lit(&self, column: usize, row: usize) -> bool {
        row < GLYPH_ROWS
            && self
                .0
                .get(column)
                .is_some_and(|bits| bits & (1 << row) != 0)
    }

    /// Iterate over the lit pixels as (`column`, `row`) pairs.
    pub fn lit_pixels(self) -> impl Iterator<Item = (usize, usize)> {
        (0..GLYPH_COLS).flat_map(move |column| {
            (0..GLYPH_ROWS)
                .filter(move |&row| self.is_lit(column, row))
                .map(move |row| (column, row))
        })
    }

    /// Number of lit pixels.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "At most 40 bits, over a fixed-size array"
    )]
    pub const fn lit_count(&self) -> u32 {
        let mut count = 0;
        let mut column = 0;
        while column < GLYPH_COLS {
            count += self.0[column].count_ones();
            column += 1;
        }
        count
    }
}
