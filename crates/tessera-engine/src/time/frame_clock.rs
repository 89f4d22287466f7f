use std::time::Instant;

/// Timing for one pipeline tick, in milliseconds.
///
/// `diff` may be arbitrarily large (the host can skip ticks while backgrounded);
/// everything driven by ticks must stay correct under large diffs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Tick {
    /// Monotonic time since the clock started.
    pub time: u64,
    /// Time elapsed since the previous tick.
    pub diff: u64,
}

impl Tick {
    #[inline]
    pub const fn new(time: u64, diff: u64) -> Self {
        Self { time, diff }
    }

    /// Tick that follows this one after `diff` milliseconds.
    #[inline]
    pub const fn next(self, diff: u64) -> Self {
        Self { time: self.time + diff, diff }
    }
}

/// Frame clock producing [`Tick`]s from wall time.
///
/// Time is measured as whole milliseconds since `start`, and `diff` is the
/// difference of consecutive readings, so sub-millisecond remainders never drift.
///
/// Unlike a simulation clock, diffs are not clamped by default: animations skip
/// through intermediate frames after a long pause instead of resuming where they
/// froze. Use [`with_max_diff`](Self::with_max_diff) when a host wants clamping.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_ms: u64,
    frame_index: u64,
    max_diff: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_ms: 0,
            frame_index: 0,
            max_diff: None,
        }
    }

    /// Creates a clock whose reported `diff` never exceeds `max_diff` milliseconds.
    ///
    /// `time` still follows the wall clock.
    pub fn with_max_diff(max_diff: u64) -> Self {
        Self { max_diff: Some(max_diff), ..Self::new() }
    }

    /// Number of ticks produced so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns the tick for this frame.
    pub fn tick(&mut self) -> Tick {
        let now_ms = self.start.elapsed().as_millis() as u64;
        self.advance_to(now_ms)
    }

    fn advance_to(&mut self, now_ms: u64) -> Tick {
        let now_ms = now_ms.max(self.last_ms);
        let mut diff = now_ms - self.last_ms;
        if let Some(max) = self.max_diff {
            diff = diff.min(max);
        }
        self.last_ms = now_ms;
        self.frame_index = self.frame_index.wrapping_add(1);
        Tick::new(now_ms, diff)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
