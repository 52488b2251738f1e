//! # Stage-cycling test bench for SH1106 OLED panels
//!
//! This crate drives a 128x64 monochrome SH1106 panel over a 4-wire bus (clock, data,
//! chip select and data/command select, plus a reset line) and cycles it through five fixed
//! test screens on a timer.
//!
//! The pieces, bottom up:
//!  - `instructions`: the SH1106 command set as typed instructions
//!  - `backend`: how bytes get to the panel, either bit banged over GPIO or through a hardware
//!    SPI device
//!  - `display` and `graphics`: the SH1106 driver with its frame buffer and the
//!    embedded_graphics glue (feature "graphics", on by default)
//!  - `schedule`: which stage is active, derived from elapsed time
//!  - `stages`: what each stage draws
//!  - `app`: bring-up and the forever loop tying it all together
//!
//! Board specific code (pins, clocks, serial logger) lives in the crates under
//! `platform-examples/`.
#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod config;
pub mod display;
pub mod error;
pub mod instructions;
pub mod schedule;

#[cfg(feature = "graphics")]
pub mod app;
#[cfg(feature = "graphics")]
pub mod graphics;
#[cfg(feature = "graphics")]
pub mod stages;

pub use crate::backend::{NoDelay, SpiBackendError, Sh1106Backend, Sh1106GpioBackend, Sh1106SpiBackend};
pub use crate::display::Sh1106;
pub use crate::error::Error;
pub use crate::schedule::{Millis, Stage, StageScheduler};

#[cfg(feature = "graphics")]
pub use crate::app::{bring_up, Clock, TestBench};
#[cfg(feature = "graphics")]
pub use crate::graphics::GraphicsMode;
#[cfg(feature = "graphics")]
pub use crate::stages::{CycleCounter, RenderError, StageRenderer};

/// width of the visible panel in pixels
pub const WIDTH: u8 = config::WIDTH;

/// height of the visible panel in pixels
pub const HEIGHT: u8 = config::HEIGHT;

/// the SH1106 RAM is organised in pages of 8 vertical pixels
pub const PAGES: u8 = HEIGHT / 8;

/// size of the frame buffer in bytes, one bit per pixel
pub const BUFFER_SIZE: usize = WIDTH as usize * PAGES as usize;

/// the SH1106 has 132 columns of RAM, the 128 visible ones start at column 2
pub const COLUMN_OFFSET: u8 = 2;
