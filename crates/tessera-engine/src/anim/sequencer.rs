use std::sync::Arc;

use crate::coords::Rect;

use super::{AnimationFrame, FrameSequence, Playback};

/// Outcome of one [`FrameSequencer::advance`] call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Advance {
    /// The current frame index differs from the one before the call.
    pub frame_changed: bool,
    /// A looping sequence wrapped past its last frame at least once.
    pub wrapped: bool,
    /// A one-shot sequence reached its last frame. Reported once per playthrough.
    pub completed: bool,
}

/// Playback cursor over a shared [`FrameSequence`].
///
/// Invariant: after every `advance`, `elapsed() < current duration`. Overflow carries
/// into following frames within the same call, so one large diff skips through
/// intermediate frames instead of stalling on one.
///
/// `advance(a); advance(b)` lands on the same `(index, elapsed)` as `advance(a + b)`.
#[derive(Debug, Clone)]
pub struct FrameSequencer {
    sequence: Arc<FrameSequence>,
    index: usize,
    elapsed: u64,
    completed: bool,
}

impl FrameSequencer {
    pub fn new(sequence: impl Into<Arc<FrameSequence>>) -> Self {
        Self {
            sequence: sequence.into(),
            index: 0,
            elapsed: 0,
            completed: false,
        }
    }

    #[inline]
    pub fn sequence(&self) -> &Arc<FrameSequence> {
        &self.sequence
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time spent in the current frame.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    #[inline]
    pub fn current_frame(&self) -> &AnimationFrame {
        &self.sequence.frames()[self.index]
    }

    /// Source region of the current frame.
    #[inline]
    pub fn region(&self) -> Rect {
        self.current_frame().region()
    }

    /// `true` once a one-shot sequence has reached its last frame.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Rewinds to frame 0 and re-arms the completion signal.
    pub fn restart(&mut self) {
        self.index = 0;
        self.elapsed = 0;
        self.completed = false;
    }

    /// Advances playback by `diff` milliseconds.
    pub fn advance(&mut self, diff: u64) -> Advance {
        let start = self.index;
        let mut out = Advance::default();

        match self.sequence.playback() {
            Playback::Loop => out.wrapped = self.advance_looping(diff),
            Playback::Once => {
                self.advance_once(diff);
                if self.index + 1 == self.sequence.len() && !self.completed {
                    self.completed = true;
                    out.completed = true;
                }
            }
        }

        out.frame_changed = self.index != start;
        out
    }

    fn advance_looping(&mut self, diff: u64) -> bool {
        let seq = &self.sequence;
        let total = seq.total_duration();
        let mut wrapped = false;

        // Time measured from the start of the current frame. Whole cycles land back
        // on the same frame start, so they are skipped arithmetically.
        let mut remaining = self.elapsed.saturating_add(diff);
        if remaining >= total {
            remaining %= total;
            wrapped = true;
        }

        let mut index = self.index;
        while remaining >= seq.duration(index) {
            remaining -= seq.duration(index);
            index += 1;
            if index == seq.len() {
                index = 0;
                wrapped = true;
            }
        }

        self.index = index;
        self.elapsed = remaining;
        wrapped
    }

    fn advance_once(&mut self, diff: u64) {
        let seq = &self.sequence;

        // The playhead saturates one millisecond short of the end, which keeps the
        // clamped last frame within its own duration.
        let last = seq.total_duration() - 1;
        let playhead = (seq.start_of(self.index) + self.elapsed)
            .saturating_add(diff)
            .min(last);

        let mut index = self.index;
        let mut remaining = playhead - seq.start_of(index);
        while remaining >= seq.duration(index) {
            remaining -= seq.duration(index);
            index += 1;
        }

        self.index = index;
        self.elapsed = remaining;
    }
}
