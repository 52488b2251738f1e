//! # Bus backends for the SH1106
//!
//! The SH1106 listens on a 4-wire serial bus: clock, data, chip select and data/command select.
//! The driver doesn't care how the bytes get there, it only needs a `Sh1106Backend`.
//!
//! Two backends are provided:
//!  - `Sh1106GpioBackend` bit bangs the bus on four plain GPIO pins. Use it when the panel is
//!    wired to pins that aren't routed to a SPI peripheral, or you don't want to sacrifice one.
//!  - `Sh1106SpiBackend` uses a hardware `SpiDevice` plus a GPIO for data/command. The
//!    `SpiDevice` takes care of chip select.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

/// Sends bytes to the SH1106, either into the command decoder or into display RAM
pub trait Sh1106Backend {
    type Error;

    /// Transfer `bytes` with the data/command line high (`data`) or low (commands).
    fn write(&mut self, data: bool, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Used to run without delay on a slow enough clock speed
pub struct NoDelay {}

impl DelayNs for NoDelay {
    #[inline]
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Half a clock period for `new_with_delay`, puts the bus at ~4MHz which is the SH1106 maximum
pub const HALF_PERIOD_NS: u32 = 125;

/// "Bit bang" 4-wire backend.
///
/// Bits go out MSB first, the SH1106 samples the data line on the rising clock edge (mode 0).
pub struct Sh1106GpioBackend<CLK, DIN, DC, CS, DELAY = NoDelay>
where
    CLK: OutputPin,
    DIN: OutputPin,
    DC: OutputPin,
    CS: OutputPin,
{
    clk: CLK,
    din: DIN,
    dc: DC,
    cs: CS,
    delay: DELAY,
}

impl<CLK, DIN, DC, CS, ERR> Sh1106GpioBackend<CLK, DIN, DC, CS, NoDelay>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
    DC: OutputPin<Error = ERR>,
    CS: OutputPin<Error = ERR>,
{
    /// Constructs the backend from the four bus pins.
    /// If the pins toggle faster than the panel can follow, use `new_with_delay`.
    pub fn new(
        clk: CLK,
        din: DIN,
        dc: DC,
        cs: CS,
    ) -> Result<Sh1106GpioBackend<CLK, DIN, DC, CS, NoDelay>, ERR> {
        Sh1106GpioBackend::new_with_delay(clk, din, dc, cs, NoDelay {})
    }
}

impl<CLK, DIN, DC, CS, DELAY, ERR> Sh1106GpioBackend<CLK, DIN, DC, CS, DELAY>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
    DC: OutputPin<Error = ERR>,
    CS: OutputPin<Error = ERR>,
    DELAY: DelayNs,
{
    /// Constructs the backend with a delay of `HALF_PERIOD_NS` on both clock phases.
    pub fn new_with_delay(
        mut clk: CLK,
        din: DIN,
        dc: DC,
        mut cs: CS,
        delay: DELAY,
    ) -> Result<Sh1106GpioBackend<CLK, DIN, DC, CS, DELAY>, ERR> {
        clk.set_low()?;
        cs.set_high()?;
        Ok(Sh1106GpioBackend {
            clk,
            din,
            dc,
            cs,
            delay,
        })
    }

    /// Gives the pins back
    pub fn release(self) -> (CLK, DIN, DC, CS) {
        (self.clk, self.din, self.dc, self.cs)
    }

    #[inline]
    fn write_bit(&mut self, high: bool) -> Result<(), ERR> {
        if high {
            self.din.set_high()?;
        } else {
            self.din.set_low()?;
        }
        self.delay.delay_ns(HALF_PERIOD_NS);
        self.clk.set_high()?;
        self.delay.delay_ns(HALF_PERIOD_NS);
        self.clk.set_low()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ERR> {
        for value in bytes {
            let mut v = *value;
            for _ in 0..8 {
                self.write_bit((v & 0x80) == 0x80)?;
                v <<= 1;
            }
        }
        Ok(())
    }
}

impl<CLK, DIN, DC, CS, DELAY, ERR> Sh1106Backend for Sh1106GpioBackend<CLK, DIN, DC, CS, DELAY>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
    DC: OutputPin<Error = ERR>,
    CS: OutputPin<Error = ERR>,
    DELAY: DelayNs,
{
    type Error = ERR;

    fn write(&mut self, data: bool, bytes: &[u8]) -> Result<(), ERR> {
        if data {
            self.dc.set_high()?;
        } else {
            self.dc.set_low()?;
        }
        self.cs.set_low()?;
        let sent = self.write_bytes(bytes);
        // deselect even when a byte failed halfway, the first error wins
        let released = self.cs.set_high();
        sent.and(released)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiBackendError<PinErr, SpiErr> {
    Pin(PinErr),
    Spi(SpiErr),
}

/// Hardware SPI backend, chip select is handled by the `SpiDevice`
pub struct Sh1106SpiBackend<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> Sh1106SpiBackend<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    pub fn new(spi: SPI, dc: DC) -> Sh1106SpiBackend<SPI, DC> {
        Sh1106SpiBackend { spi, dc }
    }

    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> Sh1106Backend for Sh1106SpiBackend<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    type Error = SpiBackendError<DC::Error, SPI::Error>;

    fn write(&mut self, data: bool, bytes: &[u8]) -> Result<(), Self::Error> {
        if data {
            self.dc.set_high().map_err(SpiBackendError::Pin)?;
        } else {
            self.dc.set_low().map_err(SpiBackendError::Pin)?;
        }
        self.spi.write(bytes).map_err(SpiBackendError::Spi)
    }
}
