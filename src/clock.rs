use tracing::warn;

/// Turns wall-clock milliseconds into whole simulation ticks.
///
/// A tick lasts `1000 / framerate` ms (integer division, so 16 ms at 60 Hz).
/// When at least one tick is due, the clock hands out every elapsed tick at
/// once and restarts from `now`; a partial tick left over is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    tick_millis: u64,
    last_millis: u64,
}

impl TickClock {
    pub fn new(framerate: u32) -> Self {
        Self {
            tick_millis: (1000 / u64::from(framerate.max(1))).max(1),
            last_millis: 0,
        }
    }

    pub fn tick_millis(&self) -> u64 {
        self.tick_millis
    }

    /// Number of ticks to simulate at time `now_millis`.
    pub fn due(&mut self, now_millis: u64) -> u64 {
        if now_millis < self.last_millis {
            warn!(now_millis, last = self.last_millis, "clock went backwards; resyncing");
            self.last_millis = now_millis;
            return 0;
        }
        let elapsed = now_millis - self.last_millis;
        if elapsed <= self.tick_millis {
            return 0;
        }
        self.last_millis = now_millis;
        elapsed / self.tick_millis
    }
}
