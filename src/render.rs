//! Paints the six clock digits into a frame buffer.
//!
//! Rendering only touches memory. Pushing a [`Frame`] to the LEDs is the LED driver's job.

use smart_leds::RGB8;

use crate::{
    config::{COLS, LED_COUNT, ROWS, SLOT_BASES, SLOT_COUNT},
    font::{GLYPH_COLS, GLYPH_ROWS, Glyph},
    led_layout::SerpentineLayout,
    settings::Settings,
};

/// Strip-ordered colors plus the global brightness to drive them with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame<const N: usize> {
    pixels: [RGB8; N],
    brightness: u8,
}

/// A frame for the clock's 8×40 matrix.
pub type ClockFrame = Frame<LED_COUNT>;

impl<const N: usize> Frame<N> {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [RGB8::new(0, 0, 0); N],
            brightness: 0,
        }
    }

    /// Turn every LED off.
    pub fn clear(&mut self) {
        self.pixels.fill(RGB8::default());
    }

    /// Colors in strip order.
    #[must_use]
    pub const fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Set the LED at strip `index`. Indices past the end are ignored.
    pub fn set(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// Number of LEDs that are not black.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|pixel| **pixel != RGB8::default())
            .count()
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Places glyphs at fixed slot positions on a serpentine matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderer<const N: usize, const ROWS: usize, const COLS: usize> {
    layout: SerpentineLayout<N, ROWS, COLS>,
    slot_bases: [usize; SLOT_COUNT],
}

/// The clock's renderer: six slots on the 8×40 matrix.
pub const CLOCK_RENDERER: Renderer<LED_COUNT, ROWS, COLS> = Renderer::new(SLOT_BASES);

impl<const N: usize, const ROWS: usize, const COLS: usize> Renderer<N, ROWS, COLS> {
    /// Constructor: checks every slot holds a whole glyph.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "const loop over a fixed-size array"
    )]
    pub const fn new(slot_bases: [usize; SLOT_COUNT]) -> Self {
        assert!(ROWS >= GLYPH_ROWS, "matrix is shorter than a glyph");
        let mut slot = 0;
        while slot < SLOT_COUNT {
            assert!(
                slot_bases[slot] + GLYPH_COLS <= COLS,
                "digit slot runs off the matrix"
            );
            slot += 1;
        }
        Self {
            layout: SerpentineLayout::new(),
            slot_bases,
        }
    }

    /// Redraw the whole frame: clear it, take the brightness from `settings`, and paint
    /// `digits` into the six slots. Slots flagged in `highlighted` use the cursor color.
    pub fn render(
        &self,
        frame: &mut Frame<N>,
        settings: &Settings,
        digits: [u8; SLOT_COUNT],
        highlighted: [bool; SLOT_COUNT],
    ) {
        frame.clear();
        frame.set_brightness(settings.brightness());
        for ((digit, base), highlighted) in digits.into_iter().zip(self.slot_bases).zip(highlighted)
        {
            self.put_digit(frame, settings, digit, base, highlighted);
        }
    }

    /// Light the glyph of `digit` with its left edge at column `base`. Unlit glyph bits are
    /// left untouched.
    pub fn put_digit(
        &self,
        frame: &mut Frame<N>,
        settings: &Settings,
        digit: u8,
        base: usize,
        highlighted: bool,
    ) {
        let color = if highlighted {
            settings.highlight_color()
        } else {
            settings.color()
        };
        let orientation = settings.orientation();
        for (glyph_column, glyph_row) in Glyph::for_digit(digit).lit_pixels() {
            let index = self
                .layout
                .glyph_index(base, glyph_column, glyph_row, orientation);
            frame.set(index, color);
        }
    }
}
