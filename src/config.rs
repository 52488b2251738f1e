//! Compile-time configuration of the test bench.
//!
//! There is no runtime configuration. Change these and rebuild.

/// GPIO of the bus clock line
pub const OLED_SCK: u8 = 6;

/// GPIO of the bus data line (MOSI)
pub const OLED_SDA: u8 = 7;

/// GPIO of the chip select line, active low
pub const OLED_CS: u8 = 5;

/// GPIO of the data/command select line (1 = data, 0 = command)
pub const OLED_DC: u8 = 1;

/// GPIO of the reset line, active low
pub const OLED_RES: u8 = 0;

/// visible columns of the panel
pub const WIDTH: u8 = 128;

/// visible rows of the panel
pub const HEIGHT: u8 = 64;

/// baud rate of the debug console
pub const SERIAL_BAUD: u32 = 115_200;

/// how long each test stage stays on screen
pub const STAGE_DURATION_MS: u32 = 2_000;

/// pause after every loop iteration, gives roughly 20 frames per second
pub const LOOP_DELAY_MS: u32 = 50;

/// time given to the panel supply to stabilise before the first command
pub const POWER_SETTLE_MS: u32 = 2_000;

/// the power settle wait is split into this many steps so progress shows on the console
pub const POWER_SETTLE_STEPS: u32 = 20;

/// the combined stage reports its cycle counter on the console every this many frames,
/// about once a second at the loop rate
pub const COUNTER_LOG_INTERVAL: u32 = 20;

/// short wait around panel initialisation
pub const PANEL_SETTLE_MS: u32 = 100;

/// contrast set after initialisation, range 0..=255
pub const DEFAULT_CONTRAST: u8 = 128;
