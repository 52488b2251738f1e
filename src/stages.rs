//! # The five test stages
//!
//! Every stage is a fixed picture: clear the frame buffer, draw, put a border around the whole
//! panel and flush. Only the combined stage has something that moves, a counter of how many
//! times it has been drawn.
//!
//! Text positions are the left end of the text baseline, so descenders hang below the given y.
//!
//! A frame is only reported on the console once it has been flushed. The first frame of a stage
//! is reported at `info`, the repeats at `debug`. The combined stage also puts its counter on
//! the console every `COUNTER_LOG_INTERVAL` frames.
use core::fmt::Write;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_6X10, FONT_7X13_BOLD, FONT_9X15_BOLD},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use log::{debug, info};

use crate::{config::COUNTER_LOG_INTERVAL, graphics::GraphicsMode, schedule::Stage, HEIGHT, WIDTH};

/// body text, roughly an 8pt font
pub const SMALL_FONT: &MonoFont<'static> = &FONT_6X10;
/// headings of the text stage
pub const MEDIUM_FONT: &MonoFont<'static> = &FONT_7X13_BOLD;
/// the welcome title
pub const LARGE_FONT: &MonoFont<'static> = &FONT_9X15_BOLD;

/// Drawing into the frame buffer or pushing it to the panel failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError<DrawErr, FlushErr> {
    Draw(DrawErr),
    Flush(FlushErr),
}

/// How often the combined stage has been drawn since boot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleCounter {
    count: u32,
}

impl CycleCounter {
    pub const fn new() -> CycleCounter {
        CycleCounter { count: 0 }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns the current count and moves on by one. Wraps after u32::MAX frames.
    pub fn advance(&mut self) -> u32 {
        let current = self.count;
        self.count = current.wrapping_add(1);
        current
    }
}

type RenderFn<D> = fn(&mut D, &mut CycleCounter) -> Result<(), <D as DrawTarget>::Error>;

/// Draws and flushes stages, owns the state the stages need between frames
#[derive(Debug, Clone, Default)]
pub struct StageRenderer {
    counter: CycleCounter,
    // stage of the last frame that made it to the panel
    shown: Option<Stage>,
}

impl StageRenderer {
    pub const fn new() -> StageRenderer {
        StageRenderer {
            counter: CycleCounter::new(),
            shown: None,
        }
    }

    pub fn counter(&self) -> &CycleCounter {
        &self.counter
    }

    // indexed by Stage::index()
    fn table<D: GraphicsMode>() -> [RenderFn<D>; Stage::COUNT] {
        [welcome::<D>, shapes::<D>, circles::<D>, text::<D>, combined::<D>]
    }

    /// Compose the frame for `stage` and push it to the panel.
    pub fn render<D: GraphicsMode>(
        &mut self,
        stage: Stage,
        display: &mut D,
    ) -> Result<(), RenderError<D::Error, D::FlushError>> {
        let draw = Self::table::<D>()[stage.index()];

        display.clear(BinaryColor::Off).map_err(RenderError::Draw)?;
        draw(display, &mut self.counter).map_err(RenderError::Draw)?;
        border(display).map_err(RenderError::Draw)?;
        display.flush().map_err(RenderError::Flush)?;

        self.report(stage);
        Ok(())
    }

    fn report(&mut self, stage: Stage) {
        let number = stage.index() + 1;
        if self.shown == Some(stage) {
            debug!("[stage {}] {}", number, headline(stage));
        } else {
            info!("[stage {}] {}", number, headline(stage));
            self.shown = Some(stage);
        }

        if stage == Stage::Combined {
            // the value on screen, advance() already moved past it
            let cycle = self.counter.count().wrapping_sub(1);
            if cycle % COUNTER_LOG_INTERVAL == 0 {
                info!("[stage {}] cycle counter: {}", number, cycle);
            } else {
                debug!("[stage {}] cycle counter: {}", number, cycle);
            }
        }
    }
}

fn headline(stage: Stage) -> &'static str {
    match stage {
        Stage::Welcome => "welcome screen - OLED Test",
        Stage::Shapes => "basic shapes - lines and boxes",
        Stage::Circles => "circles - hollow and filled",
        Stage::Text => "text - two font sizes",
        Stage::Combined => "combined - counter and shapes",
    }
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

fn fill() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(BinaryColor::On)
}

fn label<D>(display: &mut D, text: &str, x: i32, y: i32, font: &MonoFont<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(font, BinaryColor::On);
    Text::new(text, Point::new(x, y), style).draw(display)?;
    Ok(())
}

fn line<D>(display: &mut D, from: (i32, i32), to: (i32, i32)) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Line::new(Point::new(from.0, from.1), Point::new(to.0, to.1))
        .into_styled(stroke())
        .draw(display)
}

fn rect<D>(display: &mut D, x: i32, y: i32, w: u32, h: u32, style: PrimitiveStyle<BinaryColor>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(style)
        .draw(display)
}

// a circle of radius r covers 2r+1 pixels across
fn circle<D>(display: &mut D, x: i32, y: i32, r: u32, style: PrimitiveStyle<BinaryColor>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::with_center(Point::new(x, y), 2 * r + 1)
        .into_styled(style)
        .draw(display)
}

/// frame around the full panel
fn border<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    rect(display, 0, 0, WIDTH as u32, HEIGHT as u32, stroke())
}

fn welcome<D: GraphicsMode>(display: &mut D, _: &mut CycleCounter) -> Result<(), D::Error> {
    label(display, "OLED Test", 20, 30, LARGE_FONT)?;
    label(display, "ESP32-C3", 25, 50, SMALL_FONT)?;
    Ok(())
}

fn shapes<D: GraphicsMode>(display: &mut D, _: &mut CycleCounter) -> Result<(), D::Error> {
    label(display, "Lines & Boxes", 5, 10, SMALL_FONT)?;
    line(display, (10, 20), (60, 20))?;
    line(display, (80, 20), (80, 50))?;
    rect(display, 20, 30, 30, 20, fill())?;
    rect(display, 70, 30, 50, 30, stroke())?;
    Ok(())
}

fn circles<D: GraphicsMode>(display: &mut D, _: &mut CycleCounter) -> Result<(), D::Error> {
    label(display, "Circles", 35, 10, SMALL_FONT)?;
    circle(display, 30, 38, 10, stroke())?;
    circle(display, 65, 38, 8, stroke())?;
    circle(display, 100, 38, 6, fill())?;
    Ok(())
}

fn text<D: GraphicsMode>(display: &mut D, _: &mut CycleCounter) -> Result<(), D::Error> {
    label(display, "Text Test", 15, 25, MEDIUM_FONT)?;
    label(display, "Font: 8pt", 10, 45, SMALL_FONT)?;
    Ok(())
}

// u32::MAX has 10 digits, so a u32 always fits
fn decimal(value: u32) -> heapless::String<10> {
    let mut digits = heapless::String::new();
    let written = write!(digits, "{}", value);
    debug_assert!(written.is_ok());
    digits
}

fn combined<D: GraphicsMode>(display: &mut D, counter: &mut CycleCounter) -> Result<(), D::Error> {
    let cycle = counter.advance();
    let digits = decimal(cycle);

    label(display, "Cycle:", 5, 12, SMALL_FONT)?;
    label(display, &digits, 60, 12, SMALL_FONT)?;
    line(display, (10, 30), (118, 30))?;
    circle(display, 64, 45, 12, stroke())?;
    rect(display, 20, 50, 25, 10, fill())?;
    rect(display, 85, 50, 25, 10, stroke())?;
    Ok(())
}
