//! # Main driver for the SH1106
//!
//! In here most of the data structures and functions care about state keeping of the display
//! and sending raw bytes to the device. Drawing is done in the in-memory frame buffer, see the
//! `graphics` module, and pushed to the panel with `flush()`.
//!
//! Typically you want to look into the following functions:
//!  - Sh1106::new() to create a new driver instance
//!  - Sh1106::init() to reset and configure the panel, mandatory before anything shows up
//!  - Sh1106::set_contrast() to change the brightness of the panel
//! The other functions are more "advanced". You can invert the display or put the panel to
//! sleep with set_display_on(false) for example.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::{
    backend::Sh1106Backend, error::Error, instructions::prelude::*, BUFFER_SIZE, COLUMN_OFFSET,
    HEIGHT, PAGES, WIDTH,
};

/// main struct for state keeping of the SH1106 driver
pub struct Sh1106<B, RST>
where
    B: Sh1106Backend,
    RST: OutputPin,
{
    backend: B,
    rst: RST,
    contrast: u8,
    display_on: bool,
    mode: DisplayMode,
    /// frame buffer with the same layout as the SH1106 display RAM: page after page, 128 bytes
    /// per page, bit n of a byte is row n of that page.
    pub(crate) framebuffer: [u8; BUFFER_SIZE],
}

impl<B, RST> Sh1106<B, RST>
where
    B: Sh1106Backend,
    RST: OutputPin,
{
    /// Create a new instance of the SH1106 driver
    ///
    /// This doesn't talk to the panel yet, call init() for that.
    ///
    /// Arguments:
    ///
    /// - backend: the 4-wire bus, see the `backend` module
    /// - rst: Reset, a GPIO OutputPin connected to RES on the display
    pub fn new(backend: B, rst: RST) -> Sh1106<B, RST> {
        Sh1106 {
            backend,
            rst,
            contrast: 0x80,
            display_on: false,
            mode: DisplayMode::Normal,
            framebuffer: [0u8; BUFFER_SIZE],
        }
    }

    /// hardware reset the SH1106 with the RES pin
    ///
    /// the data sheet wants at least 10us low; we are generous because the cheap modules have
    /// a RC on that line.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<B::Error, RST::Error>> {
        Error::pin(self.rst.set_high())?;
        delay.delay_ms(1);
        Error::pin(self.rst.set_low())?;
        delay.delay_ms(10);
        Error::pin(self.rst.set_high())?;
        delay.delay_ms(10);

        self.contrast = 0x80;
        self.display_on = false;
        self.mode = DisplayMode::Normal;
        Ok(())
    }

    /// reset and configure the panel, clear its RAM and switch it on.
    ///
    /// resetting the display at startup is _mandatory_, the SH1106 is in an undefined state at
    /// power on.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<B::Error, RST::Error>> {
        self.reset(delay)?;

        for instruction in Self::init_sequence() {
            self.write_command(instruction)?;
        }
        self.contrast = 0x80;

        // the RAM holds garbage after power on
        self.clear_buffer();
        self.flush_framebuffer()?;

        self.set_display_on(true)
    }

    // pre-programmed init sequence for the common 1.3" 128x64 modules
    fn init_sequence() -> [Instruction; 14] {
        [
            DisplayOn(false),
            ClockDivide(0x80),
            MultiplexRatio(HEIGHT - 1),
            DisplayOffset(0),
            StartLine(0),
            DcDc(true),
            SegmentRemap(true),
            ComScanReversed(true),
            ComPins(0x12),
            Contrast(0x80),
            PrechargePeriod(0x22),
            VcomDeselect(0x35),
            EntireDisplayOn(false),
            SetDisplayMode(Normal),
        ]
    }

    /// zero the frame buffer, the panel is untouched until the next flush
    pub fn clear_buffer(&mut self) {
        self.framebuffer = [0u8; BUFFER_SIZE];
    }

    /// raw access to the frame buffer, page after page
    pub fn framebuffer(&self) -> &[u8; BUFFER_SIZE] {
        &self.framebuffer
    }

    /// whether the pixel at x, y is lit in the frame buffer. None when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<bool> {
        if x < WIDTH as u32 && y < HEIGHT as u32 {
            let byte = self.framebuffer[((y / 8) * WIDTH as u32 + x) as usize];
            Some(byte & (1 << (y % 8)) != 0)
        } else {
            None
        }
    }

    // Push all pages to display RAM. Every page needs its own address, and the column has
    // to be reset to the first visible one.
    pub(crate) fn flush_framebuffer(&mut self) -> Result<(), Error<B::Error, RST::Error>> {
        for page in 0..PAGES {
            self.write_command(PageAddress(page))?;
            self.write_command(ColumnAddress(COLUMN_OFFSET))?;
            let start = page as usize * WIDTH as usize;
            let end = start + WIDTH as usize;
            Error::bus(self.backend.write(true, &self.framebuffer[start..end]))?;
        }
        Ok(())
    }

    /// Send a single instruction to the SH1106 chip.
    pub fn write_command(&mut self, instruction: Instruction) -> Result<(), Error<B::Error, RST::Error>> {
        let opcode = instruction.opcode();
        Error::bus(self.backend.write(false, opcode.as_slice()))
    }

    /// Send a buffer of data straight into display RAM at the current page and column.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error<B::Error, RST::Error>> {
        Error::bus(self.backend.write(true, data))
    }

    /// Set the contrast (brightness) of the panel, 0..=255
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<B::Error, RST::Error>> {
        self.write_command(Contrast(contrast))?;
        self.contrast = contrast;
        Ok(())
    }

    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Switch the panel on, or put it in sleep mode. RAM content is kept while sleeping.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<B::Error, RST::Error>> {
        self.write_command(DisplayOn(on))?;
        self.display_on = on;
        Ok(())
    }

    pub fn is_display_on(&self) -> bool {
        self.display_on
    }

    /// Normal or reverse video, talks directly to the hardware.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error<B::Error, RST::Error>> {
        self.write_command(SetDisplayMode(mode))?;
        self.mode = mode;
        Ok(())
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// borrow the backend, mostly useful to inspect a mock in tests
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Gives the backend and reset pin back
    pub fn release(self) -> (B, RST) {
        (self.backend, self.rst)
    }
}
