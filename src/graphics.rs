//! Graphics for the SH1106
//!
//! This module is behind the feature flag "graphics", which is on by default.
//!
//! It implements all necessary functions and traits to be able to use the embedded_graphics
//! library, so all circle/line/text/rectangle/bitmap functions are available on the screen.
//! It still is possible to directly manipulate the frame buffer with set_pixel() without using
//! embedded_graphics functions.
//!
//! The typical workflow for (animated) graphics is:
//!  - clear the frame buffer with Sh1106::clear_buffer() (or DrawTarget::clear())
//!  - draw "stuff" into the frame buffer
//!  - Sh1106::flush() the frame buffer to the panel, it now gets visible
//!  - rinse and repeat
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};
use embedded_hal::digital::OutputPin;

use crate::{backend::Sh1106Backend, display::Sh1106, error::Error, BUFFER_SIZE, HEIGHT, WIDTH};

/// A monochrome draw target that composes frames in memory and pushes them to a panel.
pub trait GraphicsMode: DrawTarget<Color = BinaryColor> {
    type FlushError;

    /// Write the in-memory frame buffer to the panel
    fn flush(&mut self) -> Result<(), Self::FlushError>;

    /// Set a pixel at x, y in the frame buffer. Out of bounds pixels are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor);
}

impl<B, RST> GraphicsMode for Sh1106<B, RST>
where
    B: Sh1106Backend,
    RST: OutputPin,
{
    type FlushError = Error<B::Error, RST::Error>;

    fn flush(&mut self) -> Result<(), Self::FlushError> {
        self.flush_framebuffer()
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        if x < WIDTH as u32 && y < HEIGHT as u32 {
            let byte = &mut self.framebuffer[((y / 8) * WIDTH as u32 + x) as usize];
            let mask = 1 << (y % 8);
            match color {
                BinaryColor::On => *byte |= mask,
                BinaryColor::Off => *byte &= !mask,
            }
        }
    }
}

// By implementing these few functions we get the complete power of the embedded_graphics
// library for free.
impl<B, RST> DrawTarget for Sh1106<B, RST>
where
    B: Sh1106Backend,
    RST: OutputPin,
{
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(pos, color) in pixels {
            // negative coordinates are off screen, set_pixel clips the rest
            if let (Ok(x), Ok(y)) = (u32::try_from(pos.x), u32::try_from(pos.y)) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        let byte: u8 = match color {
            BinaryColor::On => 0xff,
            BinaryColor::Off => 0x00,
        };
        self.framebuffer = [byte; BUFFER_SIZE];
        Ok(())
    }
}

impl<B, RST> OriginDimensions for Sh1106<B, RST>
where
    B: Sh1106Backend,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}
