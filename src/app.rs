//! # Bring-up and the main loop
//!
//! `bring_up` is the one-time setup: banner on the console, give the panel supply time to
//! settle, initialise the SH1106 and blank it. `TestBench` is the loop: ask the scheduler which
//! stage is active, draw it, sleep, forever.
//!
//! Time and sleeping come from the board, through `Clock` and `embedded_hal::delay::DelayNs`,
//! so the whole thing runs just as well against a simulated clock on the host.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::{
    backend::Sh1106Backend,
    config::*,
    display::Sh1106,
    error::Error,
    graphics::GraphicsMode,
    schedule::{Millis, Stage, StageScheduler},
    stages::{RenderError, StageRenderer},
};

/// Source of "milliseconds since boot"
pub trait Clock {
    fn now(&mut self) -> Millis;
}

/// One-time setup of the console output and the panel.
pub fn bring_up<B, RST, D>(display: &mut Sh1106<B, RST>, delay: &mut D) -> Result<(), Error<B::Error, RST::Error>>
where
    B: Sh1106Backend,
    RST: OutputPin,
    D: DelayNs,
{
    info!("========================================");
    info!("    SH1106 OLED test bench");
    info!("========================================");
    info!("[init] console at {} baud", SERIAL_BAUD);
    info!(
        "[init] pins: SCK=GPIO{} SDA=GPIO{} CS=GPIO{} DC=GPIO{} RES=GPIO{}",
        OLED_SCK, OLED_SDA, OLED_CS, OLED_DC, OLED_RES
    );

    info!("[step 1] waiting for the panel supply to settle...");
    let step = POWER_SETTLE_MS / POWER_SETTLE_STEPS;
    for n in 1..=POWER_SETTLE_STEPS {
        delay.delay_ms(step);
        info!("[step 1] {} ms", n * step);
    }
    info!("[step 1] done ({} ms)", POWER_SETTLE_MS);

    info!("[step 2] initialising the panel...");
    delay.delay_ms(PANEL_SETTLE_MS);
    display.init(delay)?;
    delay.delay_ms(PANEL_SETTLE_MS);
    display.set_contrast(DEFAULT_CONTRAST)?;
    display.clear_buffer();
    display.flush()?;
    info!("[oled] panel initialised, screen should be black");

    info!("=== init done ===");
    for stage in Stage::ALL {
        info!(
            "  - stage {}: {} ({} ms)",
            stage.index() + 1,
            stage.description(),
            STAGE_DURATION_MS
        );
    }
    info!("  - then the cycle repeats");
    Ok(())
}

/// The main loop state: display, time source, scheduler and the stage renderer
pub struct TestBench<D, C>
where
    D: GraphicsMode,
    C: Clock,
{
    display: D,
    clock: C,
    scheduler: StageScheduler,
    renderer: StageRenderer,
}

impl<D, C> TestBench<D, C>
where
    D: GraphicsMode,
    C: Clock,
{
    /// Test bench with the default stage duration. The first stage starts now, so it gets its
    /// full time on screen no matter how long bring-up took.
    pub fn new(display: D, mut clock: C) -> TestBench<D, C> {
        let scheduler = StageScheduler::starting_at(STAGE_DURATION_MS, clock.now());
        TestBench::with_scheduler(display, clock, scheduler)
    }

    pub fn with_scheduler(display: D, clock: C, scheduler: StageScheduler) -> TestBench<D, C> {
        TestBench {
            display,
            clock,
            scheduler,
            renderer: StageRenderer::new(),
        }
    }

    /// One loop iteration without the sleep: pick the stage and draw it.
    pub fn step(&mut self) -> Result<Stage, RenderError<D::Error, D::FlushError>> {
        let now = self.clock.now();
        let stage = self.scheduler.evaluate(now);
        self.renderer.render(stage, &mut self.display)?;
        Ok(stage)
    }

    /// Run the loop forever. A frame that fails to draw is dropped, the next one is tried
    /// after the usual delay.
    pub fn run<DL: DelayNs>(mut self, delay: &mut DL) -> ! {
        loop {
            if let Err(err) = self.step() {
                match err {
                    RenderError::Draw(_) => warn!("frame dropped: drawing failed"),
                    RenderError::Flush(_) => warn!("frame dropped: flush to panel failed"),
                }
            }
            delay.delay_ms(LOOP_DELAY_MS);
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn scheduler(&self) -> &StageScheduler {
        &self.scheduler
    }

    pub fn renderer(&self) -> &StageRenderer {
        &self.renderer
    }
}
