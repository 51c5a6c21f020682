//! Host-level tests for the column-serpentine strip addressing.

use matrix_clock::{
    Orientation,
    config::{COLS, LED_COUNT, ROWS, SLOT_BASES},
    font::{GLYPH_COLS, GLYPH_ROWS},
    led_layout::SerpentineLayout,
};

const LAYOUT: SerpentineLayout<LED_COUNT, ROWS, COLS> = SerpentineLayout::new();
const NORMAL: [u16; LED_COUNT] = LAYOUT.mapping_by_xy(Orientation::Normal);
const ROTATED: [u16; LED_COUNT] = LAYOUT.mapping_by_xy(Orientation::Rotated);

fn is_permutation(mapping: &[u16]) -> bool {
    let mut sorted = mapping.to_vec();
    sorted.sort_unstable();
    sorted.iter().copied().eq(0..u16::try_from(mapping.len()).expect("fits in u16"))
}

#[test]
fn full_grid_is_a_permutation_in_both_orientations() {
    assert!(is_permutation(&NORMAL));
    assert!(is_permutation(&ROTATED));
}

#[test]
fn odd_columns_run_up_and_even_columns_run_down() {
    // Column 0 is wired from the bottom row to the top row.
    assert_eq!(LAYOUT.index(0, 0, Orientation::Normal), ROWS - 1);
    assert_eq!(LAYOUT.index(0, ROWS - 1, Orientation::Normal), 0);
    // Column 1 continues from the top.
    assert_eq!(LAYOUT.index(1, 0, Orientation::Normal), ROWS);
    assert_eq!(LAYOUT.index(1, ROWS - 1, Orientation::Normal), 2 * ROWS - 1);
    // The last column ends the strip.
    assert_eq!(LAYOUT.index(COLS - 1, ROWS - 1, Orientation::Normal), LED_COUNT - 1);
}

#[test]
fn rotated_is_reflection_of_opposite_parity_rule() {
    for column in 0..COLS {
        for row in 0..ROWS {
            let opposite = if column % 2 == 1 {
                column * ROWS + (ROWS - 1 - row)
            } else {
                column * ROWS + row
            };
            assert_eq!(
                LAYOUT.index(column, row, Orientation::Rotated),
                LED_COUNT - 1 - opposite,
                "column {column}, row {row}"
            );
        }
    }
}

#[test]
fn rotated_lights_the_led_diagonally_opposite() {
    for column in 0..COLS {
        for row in 0..ROWS {
            assert_eq!(
                LAYOUT.index(column, row, Orientation::Rotated),
                LAYOUT.index(COLS - 1 - column, ROWS - 1 - row, Orientation::Normal),
            );
        }
    }
}

#[test]
fn slot_indices_are_unique_and_in_range() {
    for orientation in [Orientation::Normal, Orientation::Rotated] {
        for base in SLOT_BASES {
            let mut indices: Vec<usize> = (0..GLYPH_COLS)
                .flat_map(|glyph_column| {
                    (0..GLYPH_ROWS).map(move |glyph_row| (glyph_column, glyph_row))
                })
                .map(|(glyph_column, glyph_row)| {
                    LAYOUT.glyph_index(base, glyph_column, glyph_row, orientation)
                })
                .collect();
            assert!(indices.iter().all(|index| *index < LED_COUNT));
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), GLYPH_COLS * GLYPH_ROWS);
        }
    }
}

#[test]
fn slots_do_not_overlap() {
    let mut all: Vec<usize> = SLOT_BASES
        .iter()
        .flat_map(|base| {
            (0..GLYPH_COLS).flat_map(move |glyph_column| {
                (0..GLYPH_ROWS).map(move |glyph_row| {
                    LAYOUT.glyph_index(*base, glyph_column, glyph_row, Orientation::Normal)
                })
            })
        })
        .collect();
    let total = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), total);
}
