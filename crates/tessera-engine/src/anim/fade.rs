/// Result of stepping a [`Fade`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FadeStep {
    /// Opacity after this step.
    pub opacity: f32,
    /// At least one step was taken.
    pub changed: bool,
    /// The last step has been taken; the fade can be dropped.
    pub finished: bool,
}

/// Multi-step opacity change (dim, fade in, fade out).
///
/// State is `(remaining steps, current amount)`: every `interval` milliseconds one
/// step of `delta` is applied until no steps remain. The fade is stepped by the
/// owning element's update, so dropping the element (or its layer) cancels it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    amount: f32,
    target: f32,
    delta: f32,
    remaining: u32,
    interval: u64,
    carry: u64,
}

impl Fade {
    /// Fade from `from` to `to` in `steps` steps, one every `interval` ms.
    ///
    /// `steps == 0` or `interval == 0` completes on the first step.
    pub fn new(from: f32, to: f32, steps: u32, interval: u64) -> Self {
        let from = from.clamp(0.0, 1.0);
        let to = to.clamp(0.0, 1.0);
        let steps = if interval == 0 { 0 } else { steps };
        let delta = if steps == 0 { 0.0 } else { (to - from) / steps as f32 };
        Self { amount: from, target: to, delta, remaining: steps, interval, carry: 0 }
    }

    pub fn fade_out(steps: u32, interval: u64) -> Self {
        Self::new(1.0, 0.0, steps, interval)
    }

    pub fn fade_in(steps: u32, interval: u64) -> Self {
        Self::new(0.0, 1.0, steps, interval)
    }

    /// Dims from full opacity down to `level`.
    pub fn dim(level: f32, steps: u32, interval: u64) -> Self {
        Self::new(1.0, level, steps, interval)
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.amount
    }

    #[inline]
    pub fn remaining_steps(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Applies every step that falls within `diff` milliseconds.
    pub fn step(&mut self, diff: u64) -> FadeStep {
        if self.remaining == 0 {
            let changed = self.amount != self.target;
            self.amount = self.target;
            return FadeStep { opacity: self.amount, changed, finished: true };
        }

        self.carry = self.carry.saturating_add(diff);
        let due = (self.carry / self.interval).min(self.remaining as u64) as u32;
        self.carry -= due as u64 * self.interval;
        self.remaining -= due;

        if self.remaining == 0 {
            // Snap to the target so float error never leaves a residue.
            self.amount = self.target;
            self.carry = 0;
        } else {
            self.amount += self.delta * due as f32;
        }

        FadeStep { opacity: self.amount, changed: due > 0, finished: self.remaining == 0 }
    }
}
