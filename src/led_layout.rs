//! A fully const module that tells the strip index of each LED pixel.
//!
//! The matrix is wired serpentine by column: adjacent columns run in opposite vertical
//! directions. See [`SerpentineLayout`] for the addressing rule and how rotation works.

use crate::settings::Orientation;

/// Column-serpentine addressing for a `COLS`×`ROWS` matrix of `N` LEDs.
///
/// With [`Orientation::Normal`], strip order runs toward row 0 in even columns and away from it
/// in odd columns. [`Orientation::Rotated`] turns the picture 180°: the index is computed with
/// the opposite parity rule and then reflected through the far end of the strip.
///
/// # Examples
///
/// ```rust
/// use matrix_clock::led_layout::SerpentineLayout;
/// use matrix_clock::Orientation;
///
/// const LAYOUT: SerpentineLayout<8, 2, 4> = SerpentineLayout::new();
/// const NORMAL: [u16; 8] = LAYOUT.mapping_by_xy(Orientation::Normal);
/// const ROTATED: [u16; 8] = LAYOUT.mapping_by_xy(Orientation::Rotated);
///
/// assert_eq!(NORMAL, [1, 2, 5, 6, 0, 3, 4, 7]);
/// assert_eq!(ROTATED, [7, 4, 3, 0, 6, 5, 2, 1]);
/// ```
///
/// ```text
/// Normal (strip index at col,row; row 0 first):   Rotated:
///   1  2  5  6                                       7  4  3  0
///   0  3  4  7                                       6  5  2  1
/// ```
///
/// A layout whose cell count does not match is caught at compile time:
///
/// ```compile_fail
/// # use matrix_clock::led_layout::SerpentineLayout;
/// const BAD: SerpentineLayout<9, 2, 4> = SerpentineLayout::new();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerpentineLayout<const N: usize, const ROWS: usize, const COLS: usize> {
    _private: (),
}

impl<const N: usize, const ROWS: usize, const COLS: usize> SerpentineLayout<N, ROWS, COLS> {
    /// Constructor: checks the grid dimensions.
    ///
    /// The column count must be even so that the reflection used for rotation maps each
    /// column onto a column of the same wiring direction.
    #[must_use]
    pub const fn new() -> Self {
        assert!(ROWS > 0 && COLS > 0, "ROWS and COLS must be positive");
        assert!(ROWS * COLS == N, "ROWS*COLS must equal N");
        assert!(COLS % 2 == 0, "COLS must be even for 180° rotation");
        assert!(N <= u16::MAX as usize, "total LEDs must fit in u16");
        Self { _private: () }
    }

    /// Strip index of the LED at (`column`, `row`).
    ///
    /// Callers guarantee `column < COLS` and `row < ROWS`; the glyph and slot layout are fixed
    /// at compile time.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "column < COLS and row < ROWS keep every term below N"
    )]
    pub const fn index(&self, column: usize, row: usize, orientation: Orientation) -> usize {
        debug_assert!(column < COLS, "column out of bounds");
        debug_assert!(row < ROWS, "row out of bounds");

        let odd_column = column % 2 == 1;
        match orientation {
            Orientation::Normal => Self::column_index(column, row, odd_column),
            Orientation::Rotated => N - 1 - Self::column_index(column, row, !odd_column),
        }
    }

    /// Strip index of bit (`glyph_column`, `glyph_row`) of a glyph whose left edge is `base`.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "slot bases leave room for a full glyph"
    )]
    pub const fn glyph_index(
        &self,
        base: usize,
        glyph_column: usize,
        glyph_row: usize,
        orientation: Orientation,
    ) -> usize {
        self.index(base + glyph_column, glyph_row, orientation)
    }

    /// Reverse lookup table: row-major (`row * COLS + column`) → strip index.
    ///
    /// Panics at compile time (when used in a `const`) if the result is not a permutation.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        clippy::cast_possible_truncation,
        reason = "indices are bounded by N, which fits in u16"
    )]
    pub const fn mapping_by_xy(&self, orientation: Orientation) -> [u16; N] {
        let mut mapping = [0u16; N];
        let mut seen = [false; N];

        let mut row = 0;
        while row < ROWS {
            let mut column = 0;
            while column < COLS {
                let led_index = self.index(column, row, orientation);
                assert!(led_index < N, "strip index out of bounds");
                assert!(!seen[led_index], "duplicate strip index in mapping");
                seen[led_index] = true;
                mapping[row * COLS + column] = led_index as u16;
                column += 1;
            }
            row += 1;
        }

        mapping
    }

    /// Strip index before any rotation. `forward` columns run with increasing row.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "column < COLS and row < ROWS"
    )]
    const fn column_index(column: usize, row: usize, forward: bool) -> usize {
        if forward {
            column * ROWS + row
        } else {
            column * ROWS + (ROWS - 1 - row)
        }
    }
}

impl<const N: usize, const ROWS: usize, const COLS: usize> Default
    for SerpentineLayout<N, ROWS, COLS>
{
    fn default() -> Self {
        Self::new()
    }
}
