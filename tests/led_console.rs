//! Host-level tests for the serial LED controller console.

use embassy_time::Instant;
use matrix_clock::led_console::{ColorOrder, ConsoleError, LedConsole, letter_color};
use smart_leds::{RGB8, colors};

/// Feed `input` at time `millis` and collect everything the console sends back.
fn send_at(console: &mut LedConsole, input: &[u8], millis: u64) -> String {
    let mut output = Vec::new();
    for byte in input {
        let reply = console.receive(*byte, Instant::from_millis(millis));
        output.extend_from_slice(reply.as_bytes());
    }
    String::from_utf8(output).expect("console replies are ASCII")
}

fn send(console: &mut LedConsole, input: &[u8]) -> String {
    send_at(console, input, 0)
}

#[test]
fn banner_and_queries() {
    let mut console = LedConsole::new();
    assert_eq!(console.banner().as_bytes(), b"LED Controller v1.0>");
    assert_eq!(send(&mut console, b"V\r"), ".LED Controller v1.0>");
    assert_eq!(send(&mut console, b"m\r"), ".320>");
    assert_eq!(
        send(&mut console, b"D\r"),
        ".NumLEDs=8 ClrOrder=GRB LEDPin=3 Bright=20>"
    );
    assert_eq!(send(&mut console, b"L\r"), ".>");
}

#[test]
fn empty_line_only_prompts() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"\r"), ">");
    assert_eq!(send(&mut console, b"\x07\r"), ">");
}

#[test]
fn configure_sets_count_and_order() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"C 10 rgb\r"), ".>");
    assert_eq!(console.led_count(), 10);
    assert_eq!(console.color_order(), ColorOrder::Rgb);
    assert_eq!(
        send(&mut console, b"D\r"),
        ".NumLEDs=10 ClrOrder=RGB LEDPin=3 Bright=20>"
    );

    assert_eq!(send(&mut console, b"C 12,xyz\r"), ".>");
    assert_eq!(console.color_order(), ColorOrder::Grb);
}

#[test]
fn configure_rejects_out_of_range_counts() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"C 0\r"), ".E>");
    assert_eq!(send(&mut console, b"C 321\r"), ".E>");
    assert_eq!(console.led_count(), 8);
    assert_eq!(console.last_error(), Some(ConsoleError::LedCountOutOfRange));
    assert_eq!(send(&mut console, b"L\r"), ".LED count value out of range>");
}

#[test]
fn set_and_read_a_pixel() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"P 3 FF8000\r"), ".>");
    assert_eq!(console.pixel(3), Some(RGB8::new(0xFF, 0x80, 0x00)));
    assert_eq!(send(&mut console, b"R 3\r"), ".FF8000>");
    assert_eq!(send(&mut console, b"p 1,g\r"), ".>");
    assert_eq!(send(&mut console, b"R 1\r"), ".008000>");
    assert_eq!(send(&mut console, b"P 2 000000\r"), ".>");
}

#[test]
fn pixel_errors() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"P 8 R\r"), ".E>");
    assert_eq!(console.last_error(), Some(ConsoleError::LedIndexOutOfRange));
    assert_eq!(send(&mut console, b"P 1\r"), ".E>");
    assert_eq!(console.last_error(), Some(ConsoleError::PixelColorMissing));
    assert_eq!(send(&mut console, b"P 1 Q\r"), ".E>");
    assert_eq!(console.last_error(), Some(ConsoleError::InvalidPixelColor));
    assert_eq!(send(&mut console, b"R 9\r"), ".E>");
    assert_eq!(console.last_error(), Some(ConsoleError::LedIndexOutOfRange));
}

#[test]
fn fill_covers_the_configured_strip() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"F\r"), ".E>");
    assert_eq!(console.last_error(), Some(ConsoleError::FillColorMissing));
    assert_eq!(send(&mut console, b"F zz\r"), ".E>");
    assert_eq!(console.last_error(), Some(ConsoleError::InvalidFillColor));

    assert_eq!(send(&mut console, b"F b\r"), ".>");
    for index in 0..8 {
        assert_eq!(console.pixel(index), Some(colors::BLUE));
    }
    assert_eq!(console.pixel(8), Some(colors::BLACK));

    send(&mut console, b"F a\r");
    assert_eq!(console.pixel(0), Some(colors::GRAY));
}

#[test]
fn unknown_command_is_an_error() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"Z\r"), ".E>");
    assert_eq!(send(&mut console, b"L\r"), ".Unrecognized command>");
}

#[test]
fn echo_mode_spells_things_out() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"E\r"), ".0>");
    assert_eq!(send(&mut console, b"E1\r"), ".\r\n> ");
    assert!(console.echo());
    assert_eq!(
        send(&mut console, b"Q\r"),
        "Q.\r\nUnrecognized command\r\n> "
    );
    assert_eq!(send(&mut console, b"M\r"), "M.\r\n320\r\n> ");
    assert_eq!(send(&mut console, b"E x\r"), "E x.\r\nInvalid parameter\r\n> ");
    assert_eq!(send(&mut console, b"e OFF\r"), "e OFF.>");
    assert!(!console.echo());
}

#[test]
fn long_lines_are_truncated() {
    let mut console = LedConsole::new();
    send(&mut console, b"E on\r");
    let echoed = send(&mut console, b"V12345678901234567890");
    assert_eq!(echoed, "V12345678901234567");
    assert_eq!(send(&mut console, b"\r"), ".\r\nLED Controller v1.0\r\n> ");
}

#[test]
fn array_receive_fills_pixels_in_rgb_order() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"C 2\r"), ".>");
    assert_eq!(send(&mut console, b"A\r"), ".>");
    assert!(console.is_receiving_array());

    assert_eq!(send(&mut console, &[1, 2, 3, 4, 5]), "");
    assert_eq!(send(&mut console, &[6]), ">");
    assert!(!console.is_receiving_array());
    assert_eq!(console.pixel(0), Some(RGB8::new(1, 2, 3)));
    assert_eq!(console.pixel(1), Some(RGB8::new(4, 5, 6)));
}

#[test]
fn array_receive_times_out() {
    let mut console = LedConsole::new();
    send_at(&mut console, b"A\r", 1000);
    assert!(console.expire(Instant::from_millis(6000)).is_empty());
    assert!(console.is_receiving_array());
    assert_eq!(console.expire(Instant::from_millis(6001)).as_bytes(), b"E");
    assert!(!console.is_receiving_array());
    assert_eq!(console.last_error(), Some(ConsoleError::ArrayTimeout));

    // The console is back to reading commands.
    assert_eq!(send_at(&mut console, b"M\r", 6002), ".320>");
}

#[test]
fn show_reorders_for_the_strip() {
    let mut console = LedConsole::new();
    send(&mut console, b"C 8 RGB\r");
    let shows = b"S R\r"
        .iter()
        .filter(|byte| console.receive(**byte, Instant::from_millis(0)).show())
        .count();
    assert_eq!(shows, 1);
    // The strip driver sends G first, so RGB-ordered red goes out as (0, 255, 0).
    assert_eq!(console.shown().pixels()[0], RGB8::new(0, 255, 0));
    assert_eq!(console.shown().pixels()[7], RGB8::new(0, 255, 0));
    assert_eq!(console.shown().pixels()[8], colors::BLACK);
    assert_eq!(console.shown().brightness(), 20);
}

#[test]
fn show_uses_stored_pixels_in_grb_order() {
    let mut console = LedConsole::new();
    send(&mut console, b"P 0 123456\r");
    send(&mut console, b"S\r");
    assert_eq!(console.shown().pixels()[0], RGB8::new(0x12, 0x34, 0x56));
    assert_eq!(send(&mut console, b"S zz\r"), ".E>");
    assert_eq!(console.last_error(), Some(ConsoleError::InvalidPixelColor));
}

#[test]
fn brightness_keeps_the_low_byte() {
    let mut console = LedConsole::new();
    assert_eq!(send(&mut console, b"B\r"), ".20>");
    assert_eq!(send(&mut console, b"B 300\r"), ".>");
    assert_eq!(console.brightness(), 44);
}

#[test]
fn brightness_refreshes_only_after_the_strip_was_set_up() {
    let mut console = LedConsole::new();
    let shows = |console: &mut LedConsole, input: &[u8]| {
        input
            .iter()
            .filter(|byte| console.receive(**byte, Instant::from_millis(0)).show())
            .count()
    };
    assert_eq!(shows(&mut console, b"B 10\r"), 0);
    send(&mut console, b"C 4\r");
    assert_eq!(shows(&mut console, b"B 10\r"), 1);
    assert_eq!(console.shown().brightness(), 10);
}

#[test]
fn color_orders_put_the_right_byte_first() {
    let color = RGB8::new(1, 2, 3);
    // A GRB driver sends `g` first, then `r`, then `b`.
    let wire = |order: ColorOrder| {
        let driver = order.to_grb_driver(color);
        [driver.g, driver.r, driver.b]
    };
    assert_eq!(wire(ColorOrder::Grb), [2, 1, 3]);
    assert_eq!(wire(ColorOrder::Rgb), [1, 2, 3]);
    assert_eq!(wire(ColorOrder::Bgr), [3, 2, 1]);
    assert_eq!(ColorOrder::parse(b"bRg"), ColorOrder::Brg);
}

#[test]
fn letter_colors() {
    assert_eq!(letter_color(b'r'), colors::RED);
    assert_eq!(letter_color(b'N'), colors::BROWN);
    assert_eq!(letter_color(b'?'), colors::BLACK);
}

#[test]
fn replies_with_output_or_a_refresh_are_not_empty() {
    let mut console = LedConsole::new();
    assert!(console.receive(b'V', Instant::from_millis(0)).is_empty());
    assert!(!console.receive(b'\r', Instant::from_millis(0)).is_empty());

    send(&mut console, b"C 8\r");
    let mut last = console.receive(b'B', Instant::from_millis(0));
    for byte in b" 5\r" {
        last = console.receive(*byte, Instant::from_millis(0));
    }
    assert!(last.show());
    assert!(!last.is_empty());
}
