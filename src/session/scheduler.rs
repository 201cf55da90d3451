//! Fixed-rate tick gating driven by frame time

/// Decides on which frames a tick is due and measures the achieved tick rate
#[derive(Debug, Clone, PartialEq)]
pub struct TickScheduler {
    /// Target simulation speed; zero never ticks
    pub ticks_per_second: u32,
    total_time: f64,
    last_tick: f64,
    ticks_this_second: u32,
    last_rate_update: u64,
    actual_tick_rate: u32,
}

impl TickScheduler {
    /// Create a scheduler at the given target speed
    pub const fn new(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second,
            total_time: 0.0,
            last_tick: 0.0,
            ticks_this_second: 0,
            last_rate_update: 0,
            actual_tick_rate: 0,
        }
    }

    /// Account for `frame_seconds` of running time and report whether a tick is due
    ///
    /// At most one tick is due per frame. When a whole second has elapsed the
    /// ticks counted since the previous update become [`Self::actual_tick_rate`].
    pub fn advance(&mut self, frame_seconds: f64) -> bool {
        self.total_time += frame_seconds.max(0.0);

        let due = self.ticks_per_second > 0
            && self.last_tick + 1.0 / f64::from(self.ticks_per_second) <= self.total_time;
        if due {
            self.last_tick = self.total_time;
            self.ticks_this_second += 1;
        }

        let whole_seconds = self.total_time as u64;
        if whole_seconds > self.last_rate_update {
            self.actual_tick_rate = self.ticks_this_second;
            self.last_rate_update = whole_seconds;
            self.ticks_this_second = 0;
        }

        due
    }

    /// Ticks performed during the last completed second
    pub const fn actual_tick_rate(&self) -> u32 {
        self.actual_tick_rate
    }

    /// Running time accumulated so far, in seconds
    pub const fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Forget all accumulated time, keeping the target speed
    pub fn reset(&mut self) {
        *self = Self::new(self.ticks_per_second);
    }
}
