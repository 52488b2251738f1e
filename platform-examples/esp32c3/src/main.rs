//! Cycles a SH1106 128x64 OLED through the five test stages on an ESP32-C3
//!
//! Pin layout and connection for this example
//!
//! display | ESP32-C3  | purpose
//!  GND      GND         ground
//!  VCC      3V3         power to the panel
//!  CLK      GPIO6       serial clock
//!  MOSI     GPIO7       serial data
//!  RES      GPIO0       reset: active low
//!  DC       GPIO1       Data/Command (1 = Data, 0 = Command)
//!  CS       GPIO5       chip select: active low
//!
//! The bus is bit banged, so any free GPIO will do. Keep `config` in the library in sync when
//! rewiring, the start-up banner prints the pin numbers from there.
//!
//! Console output goes to the serial port at 115200 baud:
//! `espflash flash --monitor` shows it.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::{
    delay::Delay,
    gpio::{Level, Output, OutputConfig},
    main,
    time::Instant,
};
use log::{info, warn};

use sh1106_testbench::{bring_up, config, Clock, Millis, Sh1106, Sh1106GpioBackend, TestBench};

esp_bootloader_esp_idf::esp_app_desc!();

/// milliseconds since boot from the system timer
struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Millis {
        // keeping the low 32 bits gives the same wrapping counter as a 32 bit millis()
        Millis(Instant::now().duration_since_epoch().as_millis() as u32)
    }
}

#[main]
fn main() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let mut delay = Delay::new();

    // give the serial monitor a moment to attach
    delay.delay_millis(500);

    let sck = Output::new(peripherals.GPIO6, Level::Low, OutputConfig::default());
    let sda = Output::new(peripherals.GPIO7, Level::Low, OutputConfig::default());
    let cs = Output::new(peripherals.GPIO5, Level::High, OutputConfig::default());
    let dc = Output::new(peripherals.GPIO1, Level::Low, OutputConfig::default());
    let res = Output::new(peripherals.GPIO0, Level::High, OutputConfig::default());

    // esp-hal output pins can't fail
    let backend = match Sh1106GpioBackend::new(sck, sda, dc, cs) {
        Ok(backend) => backend,
        Err(never) => match never {},
    };
    let mut display = Sh1106::new(backend, res);

    if let Err(err) = bring_up(&mut display, &mut delay) {
        warn!("[oled] bring-up failed: {:?}", err);
    }
    info!(
        "[monitor] a stage switch should be logged every {} ms",
        config::STAGE_DURATION_MS
    );

    TestBench::new(display, SystemClock).run(&mut delay)
}
