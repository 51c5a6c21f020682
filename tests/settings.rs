//! Host-level tests for display settings, the settings byte, the save tracker, and time fields.

use embassy_time::{Duration, Instant};
use matrix_clock::{
    Direction, Orientation, Settings, TimeField, TimeOfDay,
    config::{BRIGHTNESS_LEVELS, COLOR_COUNT, LEVEL_COUNT, PALETTE},
    settings::SaveTracker,
};

#[test]
fn byte_0x25_decodes_to_color_2_level_2_rotated() {
    let settings = Settings::from_byte(0x25);
    assert_eq!(settings.color_index(), 2);
    assert_eq!(settings.brightness_level(), 2);
    assert_eq!(settings.orientation(), Orientation::Rotated);
    assert_eq!(settings.to_byte(), 0x25);
}

#[test]
fn every_valid_triple_survives_the_byte() {
    for color in 0..COLOR_COUNT {
        for level in 0..LEVEL_COUNT {
            for orientation in [Orientation::Normal, Orientation::Rotated] {
                let settings = Settings::new(color, level, orientation);
                assert_eq!(Settings::from_byte(settings.to_byte()), settings);
            }
        }
    }
}

#[test]
fn out_of_range_fields_decode_to_zero() {
    // Erased storage reads as 0xFF: color 15, level 7, rotated.
    let settings = Settings::from_byte(0xFF);
    assert_eq!(settings.color_index(), 0);
    assert_eq!(settings.brightness_level(), 0);
    assert_eq!(settings.orientation(), Orientation::Rotated);

    // Level 6 is one past the brightest level; the color is kept.
    let settings = Settings::from_byte(0x3C);
    assert_eq!(settings.color_index(), 3);
    assert_eq!(settings.brightness_level(), 0);
}

#[test]
fn color_wraps_after_a_full_cycle() {
    let start = Settings::new(5, 3, Orientation::Rotated);
    for direction in [Direction::Up, Direction::Down] {
        let mut settings = start;
        for _ in 0..COLOR_COUNT {
            settings.adjust_color(direction);
        }
        assert_eq!(settings, start);
    }

    let mut settings = Settings::default();
    settings.adjust_color(Direction::Down);
    assert_eq!(settings.color_index(), COLOR_COUNT - 1);
    assert_eq!(settings.color(), PALETTE[usize::from(COLOR_COUNT - 1)]);
}

#[test]
fn brightness_clamps_at_both_ends() {
    let mut settings = Settings::default();
    settings.adjust_brightness(Direction::Down);
    assert_eq!(settings.brightness_level(), 0);

    for _ in 0..LEVEL_COUNT + 3 {
        settings.adjust_brightness(Direction::Up);
    }
    assert_eq!(settings.brightness_level(), LEVEL_COUNT - 1);
    assert_eq!(settings.brightness(), BRIGHTNESS_LEVELS[usize::from(LEVEL_COUNT - 1)]);
}

#[test]
fn highlight_is_half_the_palette_away() {
    let settings = Settings::new(6, 0, Orientation::Normal);
    assert_eq!(settings.highlight_color(), PALETTE[2]);
}

#[test]
fn orientation_toggles() {
    let mut settings = Settings::default();
    settings.toggle_orientation();
    assert_eq!(settings.orientation(), Orientation::Rotated);
    settings.toggle_orientation();
    assert_eq!(settings.orientation(), Orientation::Normal);
}

#[test]
fn save_is_due_only_strictly_after_the_quiet_window() {
    let quiet = Duration::from_millis(2000);
    let mut tracker = SaveTracker::new();
    assert!(!tracker.due(Instant::from_millis(10_000), quiet));

    tracker.mark_changed(Instant::from_millis(1000));
    assert!(tracker.is_dirty());
    assert!(!tracker.due(Instant::from_millis(3000), quiet));
    assert!(tracker.due(Instant::from_millis(3001), quiet));

    // A later change restarts the window.
    tracker.mark_changed(Instant::from_millis(2500));
    assert!(!tracker.due(Instant::from_millis(3001), quiet));

    tracker.clear();
    assert!(!tracker.is_dirty());
    assert!(!tracker.due(Instant::from_millis(60_000), quiet));
}

#[test]
fn time_fields_wrap_without_carry() {
    let mut time = TimeOfDay::new(23, 59, 59).expect("valid time");
    time.adjust(TimeField::Seconds, Direction::Up);
    assert_eq!(time, TimeOfDay::new(23, 59, 0).expect("valid time"));
    time.adjust(TimeField::Minutes, Direction::Up);
    assert_eq!(time, TimeOfDay::new(23, 0, 0).expect("valid time"));
    time.adjust(TimeField::Hours, Direction::Up);
    assert_eq!(time, TimeOfDay::MIDNIGHT);

    time.adjust(TimeField::Hours, Direction::Down);
    time.adjust(TimeField::Minutes, Direction::Down);
    time.adjust(TimeField::Seconds, Direction::Down);
    assert_eq!(time, TimeOfDay::new(23, 59, 59).expect("valid time"));
}

#[test]
fn time_rejects_out_of_range_fields() {
    assert!(TimeOfDay::new(24, 0, 0).is_none());
    assert!(TimeOfDay::new(0, 60, 0).is_none());
    assert!(TimeOfDay::new(0, 0, 60).is_none());
    assert_eq!(TimeOfDay::new(9, 5, 7).expect("valid time").digits(), [0, 9, 0, 5, 0, 7]);
}
