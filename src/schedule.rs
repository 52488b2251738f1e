//! # Stage scheduling
//!
//! Which of the five test stages is on screen is a function of time only. The scheduler is
//! evaluated once per loop iteration with the current timestamp and advances to the next stage
//! once the current one has been shown for the stage duration.
//!
//! It advances at most one stage per call. If the loop got stuck for three stage durations,
//! the next call moves on by one stage and restarts the duration from there, it does not skip
//! the stages that "should" have been shown in between.
use log::info;

use crate::config::STAGE_DURATION_MS;

/// Milliseconds since boot, as a free running 32 bit counter.
///
/// The counter wraps after about 49.7 days. Differences are taken with wrapping arithmetic so
/// a single wrap between two timestamps still gives the right elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Millis(pub u32);

impl Millis {
    /// milliseconds from `earlier` to `self`, correct across one counter wrap
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// whole seconds since boot
    pub const fn as_secs(self) -> u32 {
        self.0 / 1000
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Millis {
        Millis(ms)
    }
}

/// The five test screens, in the order they are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Stage {
    /// title and border
    #[default]
    Welcome = 0,
    /// lines, a filled and a hollow box
    Shapes = 1,
    /// hollow circles and a disc
    Circles = 2,
    /// two font sizes
    Text = 3,
    /// running cycle counter and a bit of everything
    Combined = 4,
}

impl Stage {
    pub const COUNT: usize = 5;

    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::Welcome,
        Stage::Shapes,
        Stage::Circles,
        Stage::Text,
        Stage::Combined,
    ];

    /// position in the cycle, 0..=4
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Stage::ALL.get(index).copied()
    }

    /// the stage after this one, wrapping from the last back to the first
    pub const fn next(self) -> Stage {
        Stage::ALL[(self.index() + 1) % Stage::COUNT]
    }

    pub const fn description(self) -> &'static str {
        match self {
            Stage::Welcome => "welcome screen",
            Stage::Shapes => "lines and boxes",
            Stage::Circles => "circles",
            Stage::Text => "text",
            Stage::Combined => "combined with cycle counter",
        }
    }
}

/// Decides which stage is active, driven by timestamps from the caller.
#[derive(Debug, Clone)]
pub struct StageScheduler {
    duration_ms: u32,
    last_transition: Millis,
    current: Stage,
}

impl StageScheduler {
    /// Scheduler starting at the first stage at time 0
    pub const fn new(duration_ms: u32) -> StageScheduler {
        StageScheduler::starting_at(duration_ms, Millis(0))
    }

    /// Scheduler whose first stage starts at `start` instead of at boot
    pub const fn starting_at(duration_ms: u32, start: Millis) -> StageScheduler {
        StageScheduler {
            duration_ms,
            last_transition: start,
            current: Stage::Welcome,
        }
    }

    /// Returns the stage to render at `now`, moving on by one stage when the current one has
    /// been active for the full duration.
    ///
    /// Timestamps must not go backwards between calls.
    pub fn evaluate(&mut self, now: Millis) -> Stage {
        if now.elapsed_since(self.last_transition) >= self.duration_ms {
            self.last_transition = now;
            self.current = self.current.next();
            info!(
                "[time] {} s - switching to stage {} ({})",
                now.as_secs(),
                self.current.index() + 1,
                self.current.description()
            );
        }
        self.current
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    pub fn last_transition(&self) -> Millis {
        self.last_transition
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

impl Default for StageScheduler {
    fn default() -> StageScheduler {
        StageScheduler::new(STAGE_DURATION_MS)
    }
}
