//! Fixed-rate tick accounting.

use std::time::Duration;

pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
}

impl FixedTimestep {
    pub const MAX_TICKS_PER_FRAME: u32 = 5;

    pub fn new(tick_rate: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / tick_rate.max(1),
            accumulator: Duration::ZERO,
            max_ticks_per_frame: Self::MAX_TICKS_PER_FRAME,
        }
    }

    /// Adds `elapsed` real time and returns how many ticks are due.
    /// Time beyond the per-frame cap is dropped so a long stall does not
    /// turn into a burst of catch-up ticks.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_ticks_per_frame && self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
