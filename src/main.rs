//! An 8×40 LED-matrix clock with a DS3231 real-time clock and three buttons.
//!
//! Runs on a Raspberry Pi Pico RP2040. Pulling the mode-select pin low at boot turns the device
//! into a serial LED controller instead (see [`matrix_clock::led_console`]).
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use core::convert::Infallible;

use defmt::{Debug2Format, Display2Format, error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::{gpio::Output, uart::BufferedUart};
use embassy_time::{Instant, Timer, with_timeout};
use embedded_io_async::{Read as _, Write as _};
use matrix_clock::{
    ButtonEvent, ClockController, ClockSource, DateTime, Ds3231, Error, PressDuration, Result,
    SettingsStore, TickInput,
    config::{
        CONSOLE_POLL_INTERVAL, MODE_PIN_SETTLE, ONE_DAY, SAVED_BLINK, SAVED_BLINK_COUNT,
        STARTUP_BLINK, TICK_INTERVAL,
    },
    ds3231::{ClockReading, ReadChange},
    hardware::Hardware,
    led_console::{LedConsole, Reply},
    led_strip::LedStrip,
};
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(_spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let Hardware {
        mut led_strip,
        buttons,
        mode_select,
        mut status_led,
        rtc_bus,
        mut settings_store,
        mut console,
    } = Hardware::default();

    status_led.set_high();
    Timer::after(STARTUP_BLINK).await;
    status_led.set_low();

    Timer::after(MODE_PIN_SETTLE).await;
    if mode_select.is_low() {
        info!("Mode select asserted; clock disabled, running LED console");
        run_console(&mut console, &mut led_strip).await;
    }

    let mut controller = ClockController::from_settings_byte(settings_store.load()?);
    info!("Settings: {}", controller.settings());

    let mut rtc = Ds3231::new(rtc_bus);
    if let Err(err) = rtc.begin() {
        error!("{}", Display2Format(&err));
        loop {
            Timer::after(ONE_DAY).await;
        }
    }
    info!("RTC found");

    match rtc.lost_power() {
        Ok(true) => {
            warn!("RTC lost power; resetting the time");
            if let Err(err) = rtc.adjust(DateTime::REFERENCE) {
                warn!("RTC reset failed: {}", Display2Format(&err));
            }
        }
        Ok(false) => {}
        Err(err) => warn!("RTC status read failed: {}", Display2Format(&err)),
    }

    led_strip.clear().await;

    let mut reading = ClockReading::new();
    loop {
        match reading.update(rtc.now()) {
            Some(ReadChange::Failed(err)) => warn!("RTC read failed: {}", Display2Format(&err)),
            Some(ReadChange::Recovered) => info!("RTC readable again"),
            None => {}
        }

        let outcome = controller.tick(TickInput {
            now: Instant::now(),
            time: reading.time(),
            levels: buttons.levels(),
        });

        for event in &outcome.events {
            log_event(event);
        }

        if let Some(time) = outcome.commit_time {
            match rtc.adjust(DateTime::on_reference_day(time)) {
                Ok(()) => info!("Time set to {}", time),
                Err(err) => warn!("RTC write failed: {}", Display2Format(&err)),
            }
        }

        if outcome.redraw {
            led_strip.write(controller.frame()).await;
        }

        if let Some(byte) = outcome.save_settings {
            match controller.persist(&mut settings_store, byte, Instant::now()) {
                Ok(()) => blink_saved(&mut status_led).await,
                Err(err) => warn!("Settings save failed: {}", Display2Format(&err)),
            }
        }

        Timer::after(TICK_INTERVAL).await;
    }
}

fn log_event(event: &ButtonEvent) {
    match event.duration {
        PressDuration::Short => info!("Press {}", event.key),
        PressDuration::Long => info!("Hold {}", event.key),
    }
}

async fn blink_saved(status_led: &mut Output<'static>) {
    for _ in 0..SAVED_BLINK_COUNT {
        status_led.set_high();
        Timer::after(SAVED_BLINK).await;
        status_led.set_low();
        Timer::after(SAVED_BLINK).await;
    }
}

async fn run_console(uart: &mut BufferedUart, led_strip: &mut LedStrip) -> ! {
    let mut console = LedConsole::new();
    send_reply(uart, led_strip, &console, &console.banner()).await;

    let mut buffer = [0u8; 32];
    loop {
        match with_timeout(CONSOLE_POLL_INTERVAL, uart.read(&mut buffer)).await {
            Ok(Ok(count)) => {
                for byte in buffer.iter().take(count) {
                    let reply = console.receive(*byte, Instant::now());
                    send_reply(uart, led_strip, &console, &reply).await;
                }
            }
            Ok(Err(err)) => warn!("Console read failed: {}", Debug2Format(&err)),
            Err(_) => {
                let reply = console.expire(Instant::now());
                send_reply(uart, led_strip, &console, &reply).await;
            }
        }
    }
}

async fn send_reply(
    uart: &mut BufferedUart,
    led_strip: &mut LedStrip,
    console: &LedConsole,
    reply: &Reply,
) {
    if reply.is_empty() {
        return;
    }
    if reply.show() {
        led_strip.write(console.shown()).await;
    }
    if let Err(err) = uart.write_all(reply.as_bytes()).await.map_err(Error::Uart) {
        warn!("{}", Display2Format(&err));
    }
}
