//! Frame clock with clamped delta time

use std::time::Instant;

/// Tracks per-frame elapsed time for the host update loop.
///
/// Delta time is clamped to `max_delta` so a long hitch (loading, a debugger
/// pause) cannot produce one huge integration step.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Upper bound for a single frame's delta (default: 250ms)
    pub max_delta: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: 0.25,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom delta ceiling
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta,
            ..Self::default()
        }
    }

    /// Advance the clock from wall time. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by an explicit elapsed time (headless hosts, replays)
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        self.first_tick = false;
        self.delta_time = elapsed.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
        self.delta_time
    }

    /// Delta time narrowed for per-frame consumers
    pub fn delta_seconds(&self) -> f32 {
        self.delta_time as f32
    }
}
