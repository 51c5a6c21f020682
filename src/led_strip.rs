//! WS2812 output for the clock's LED strip, fed by PIO and DMA.
//!
//! A [`Frame`] carries strip-ordered colors plus a global brightness. The brightness is applied
//! while copying into the DMA buffer, so frames themselves stay at full scale.

use embassy_rp::{
    Peri,
    peripherals::{DMA_CH0, PIN_3, PIO0},
    pio::{Common, StateMachine},
    pio_programs::ws2812::{Grb, PioWs2812, PioWs2812Program},
};
use smart_leds::{RGB8, brightness};

use crate::{config::LED_COUNT, render::Frame};

/// The clock's strip: `LED_COUNT` GRB pixels on GPIO 3, PIO0 state machine 0.
pub struct LedStrip {
    driver: PioWs2812<'static, PIO0, 0, LED_COUNT, Grb>,
    // Kept so the loaded program and state machine stay owned for the strip's lifetime.
    _common: Common<'static, PIO0>,
    buffer: [RGB8; LED_COUNT],
}

impl LedStrip {
    #[must_use]
    pub fn new(
        mut common: Common<'static, PIO0>,
        sm: StateMachine<'static, PIO0, 0>,
        dma: Peri<'static, DMA_CH0>,
        pin: Peri<'static, PIN_3>,
    ) -> Self {
        let program = PioWs2812Program::new(&mut common);
        let driver = PioWs2812::new(&mut common, sm, dma, pin, &program);
        Self {
            driver,
            _common: common,
            buffer: [RGB8::default(); LED_COUNT],
        }
    }

    /// Push `frame` to the LEDs, scaled by its brightness.
    pub async fn write(&mut self, frame: &Frame<LED_COUNT>) {
        let scaled = brightness(frame.pixels().iter().copied(), frame.brightness());
        for (slot, pixel) in self.buffer.iter_mut().zip(scaled) {
            *slot = pixel;
        }
        self.driver.write(&self.buffer).await;
    }

    /// Turn every LED off.
    pub async fn clear(&mut self) {
        self.buffer = [RGB8::default(); LED_COUNT];
        self.driver.write(&self.buffer).await;
    }
}
