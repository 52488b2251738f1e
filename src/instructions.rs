//! # Module defining the instruction set of the SH1106
//!
//! All instructions are implemented as enums and most arguments as well.
//! The source code is written to resemble the data sheet as close as possible.
//! The data sheet is the "SH1106 132 X 64 Dot Matrix OLED/PLED Segment/Common Driver with
//! Controller" document from Sino Wealth.
//!
//! Unlike a lot of older LCD controllers, a fair number of SH1106 commands are "double byte"
//! commands: a mode byte followed by a data byte. That's why an instruction encodes to an
//! `Opcode`, which holds one or two bytes, instead of a plain `u8`.
//!
//! ## Page and column addressing
//! The display RAM is 132 columns by 8 pages, a page being a horizontal band of 8 pixels high.
//! Every data byte written lands in the current page at the current column and fills 8
//! vertical pixels, least significant bit at the top. The column then increases by one, the
//! page doesn't, so every page needs its own page address command.
//!
//! Most 128 pixel wide panels are wired to columns 2..130 of the RAM, so column 2 is the
//! leftmost visible pixel. See `COLUMN_OFFSET`.
//!
//! ## Contrast
//! 256 steps, more is brighter. 0x80 is the reset value and a sane default for most modules.
//!
//! ## DC-DC converter
//! The SH1106 has an internal DC-DC converter for the panel voltage. The cheap 1.3" modules
//! don't have an external supply for that, so it needs to be turned on before display on.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
/// The display mode, either normal or reverse video.
pub enum DisplayMode {
    /// RAM bit set is a lit pixel
    Normal = 0b0,

    /// RAM bit cleared is a lit pixel
    Inverse = 0b1,
}

/// SH1106 instruction set, see data sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// set the column address, 0..=131.
    // translates to: 0x00 OR lower nibble, 0x10 OR higher nibble
    ColumnAddress(u8),

    /// set the RAM line shown at the top of the panel, 0..=63
    // translates to: 0x40 OR line
    StartLine(u8),

    /// set contrast, 0..=255
    // translates to: 0x81, contrast
    Contrast(u8),

    /// mirror the columns horizontally
    // translates to: 0xA0 OR remap
    SegmentRemap(bool),

    /// force all pixels on regardless of RAM content
    // translates to: 0xA4 OR on
    EntireDisplayOn(bool),

    /// normal or reverse video
    // translates to: 0xA6 OR mode
    SetDisplayMode(DisplayMode),

    /// number of active COM lines minus one, 0..=63
    // translates to: 0xA8, ratio
    MultiplexRatio(u8),

    /// enable the internal DC-DC converter
    // translates to: 0xAD, 0x8A OR on
    DcDc(bool),

    /// panel on or sleep
    // translates to: 0xAE OR on
    DisplayOn(bool),

    /// set the page address, 0..=7
    // translates to: 0xB0 OR page
    PageAddress(u8),

    /// scan COM lines from COM[N-1] to COM0, mirrors the panel vertically
    // translates to: 0xC0, or 0xC8 when reversed
    ComScanReversed(bool),

    /// vertical shift of the COM lines, 0..=63
    // translates to: 0xD3, offset
    DisplayOffset(u8),

    /// oscillator frequency (high nibble) and clock divide ratio (low nibble)
    // translates to: 0xD5, value
    ClockDivide(u8),

    /// discharge (high nibble) and pre-charge (low nibble) periods in clocks
    // translates to: 0xD9, value
    PrechargePeriod(u8),

    /// COM pins hardware configuration, 0x02 sequential or 0x12 alternative
    // translates to: 0xDA, value
    ComPins(u8),

    /// VCOM deselect level
    // translates to: 0xDB, value
    VcomDeselect(u8),

    /// no operation
    // translates to: 0xE3
    Nop,
}

/// One or two command bytes as they go over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    bytes: [u8; 2],
    len: usize,
}

impl Opcode {
    const fn single(byte: u8) -> Opcode {
        Opcode { bytes: [byte, 0], len: 1 }
    }

    const fn double(mode: u8, data: u8) -> Opcode {
        Opcode { bytes: [mode, data], len: 2 }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

use Instruction::*;

// Use full binary presentation instead of hex, to look the same as data sheet
impl Instruction {
    /// Returns the specific instruction as bytes which can be send over a wire
    pub fn opcode(self) -> Opcode {
        match self {
            ColumnAddress(col) => Opcode::double(
                0b0000_0000 | (col & 0x0f),
                0b0001_0000 | ((col >> 4) & 0x0f),
            ),
            StartLine(line) => Opcode::single(0b0100_0000 | (line & 0x3f)),
            Contrast(contrast) => Opcode::double(0b1000_0001, contrast),
            SegmentRemap(remap) => Opcode::single(0b1010_0000 | remap as u8),
            EntireDisplayOn(on) => Opcode::single(0b1010_0100 | on as u8),
            SetDisplayMode(mode) => Opcode::single(0b1010_0110 | mode as u8),
            MultiplexRatio(ratio) => Opcode::double(0b1010_1000, ratio & 0x3f),
            DcDc(on) => Opcode::double(0b1010_1101, 0b1000_1010 | on as u8),
            DisplayOn(on) => Opcode::single(0b1010_1110 | on as u8),
            PageAddress(page) => Opcode::single(0b1011_0000 | (page & 0x07)),
            ComScanReversed(reversed) => Opcode::single(0b1100_0000 | ((reversed as u8) << 3)),
            DisplayOffset(offset) => Opcode::double(0b1101_0011, offset & 0x3f),
            ClockDivide(value) => Opcode::double(0b1101_0101, value),
            PrechargePeriod(value) => Opcode::double(0b1101_1001, value),
            ComPins(value) => Opcode::double(0b1101_1010, value),
            VcomDeselect(value) => Opcode::double(0b1101_1011, value),
            Nop => Opcode::single(0b1110_0011),
        }
    }
}

/// A prelude for convenience, it pulls all enums into scope.
pub mod prelude {
    pub use super::{DisplayMode, DisplayMode::*, Instruction, Instruction::*, Opcode};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn column_address_splits_nibbles() {
        assert_eq!(ColumnAddress(2).opcode().as_slice(), &[0x02, 0x10]);
        assert_eq!(ColumnAddress(0x83).opcode().as_slice(), &[0x03, 0x18]);
    }

    #[test]
    fn single_byte_commands() {
        assert_eq!(DisplayOn(true).opcode().as_slice(), &[0xAF]);
        assert_eq!(DisplayOn(false).opcode().as_slice(), &[0xAE]);
        assert_eq!(PageAddress(7).opcode().as_slice(), &[0xB7]);
        assert_eq!(SetDisplayMode(Inverse).opcode().as_slice(), &[0xA7]);
        assert_eq!(ComScanReversed(true).opcode().as_slice(), &[0xC8]);
        assert_eq!(StartLine(0).opcode().as_slice(), &[0x40]);
    }

    #[test]
    fn double_byte_commands() {
        assert_eq!(Contrast(0x80).opcode().as_slice(), &[0x81, 0x80]);
        assert_eq!(DcDc(true).opcode().as_slice(), &[0xAD, 0x8B]);
        assert_eq!(MultiplexRatio(63).opcode().as_slice(), &[0xA8, 0x3F]);
    }
}
