//! The Pico's peripherals, wired as listed in [`crate::config`].

use embassy_rp::{
    bind_interrupts,
    flash::{Blocking, Flash},
    gpio::{self, Input, Output, Pull},
    i2c::{self, I2c},
    peripherals::{FLASH, I2C0, PIO0, UART0},
    pio::{self, Pio},
    uart::{self, BufferedUart},
};
use static_cell::StaticCell;

use crate::{
    button::{KEY_COUNT, Level},
    config::CONSOLE_BAUD_RATE,
    led_strip::LedStrip,
    settings_store::{FlashSettingsStore, INTERNAL_FLASH_SIZE},
};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    UART0_IRQ => uart::BufferedInterruptHandler<UART0>;
});

const CONSOLE_BUFFER_LEN: usize = 64;
static CONSOLE_TX_BUFFER: StaticCell<[u8; CONSOLE_BUFFER_LEN]> = StaticCell::new();
static CONSOLE_RX_BUFFER: StaticCell<[u8; CONSOLE_BUFFER_LEN]> = StaticCell::new();

/// The front-panel buttons: Menu, Minus, Plus, in [`crate::Key::ALL`] order.
pub struct ButtonPins([Input<'static>; KEY_COUNT]);

impl ButtonPins {
    /// Sample all three buttons.
    #[must_use]
    pub fn levels(&self) -> [Level; KEY_COUNT] {
        self.0
            .each_ref()
            .map(|button| if button.is_low() { Level::Low } else { Level::High })
    }
}

pub struct Hardware {
    pub led_strip: LedStrip,
    pub buttons: ButtonPins,
    pub mode_select: Input<'static>,
    pub status_led: Output<'static>,
    pub rtc_bus: I2c<'static, I2C0, i2c::Blocking>,
    pub settings_store: FlashSettingsStore<'static, FLASH>,
    pub console: BufferedUart,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let Pio { common, sm0, .. } = Pio::new(peripherals.PIO0, Irqs);
        let led_strip = LedStrip::new(common, sm0, peripherals.DMA_CH0, peripherals.PIN_3);

        let buttons = ButtonPins([
            Input::new(peripherals.PIN_20, Pull::Up),
            Input::new(peripherals.PIN_21, Pull::Up),
            Input::new(peripherals.PIN_22, Pull::Up),
        ]);
        let mode_select = Input::new(peripherals.PIN_26, Pull::Up);
        let status_led = Output::new(peripherals.PIN_25, gpio::Level::Low);

        let rtc_bus = I2c::new_blocking(
            peripherals.I2C0,
            peripherals.PIN_5,
            peripherals.PIN_4,
            i2c::Config::default(),
        );

        let flash = Flash::<_, Blocking, INTERNAL_FLASH_SIZE>::new_blocking(peripherals.FLASH);
        let settings_store = FlashSettingsStore::new(flash);

        let mut console_config = uart::Config::default();
        console_config.baudrate = CONSOLE_BAUD_RATE;
        let console = BufferedUart::new(
            peripherals.UART0,
            peripherals.PIN_0,
            peripherals.PIN_1,
            Irqs,
            CONSOLE_TX_BUFFER.init([0; CONSOLE_BUFFER_LEN]),
            CONSOLE_RX_BUFFER.init([0; CONSOLE_BUFFER_LEN]),
            console_config,
        );

        Self {
            led_strip,
            buttons,
            mode_select,
            status_led,
            rtc_bus,
            settings_store,
            console,
        }
    }
}
