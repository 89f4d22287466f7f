//! Time-driven animation state.
//!
//! - [`AnimationFrame`] / [`FrameSequence`]: immutable, validated frame data
//! - [`FrameSequencer`]: playback cursor advanced by tick diffs
//! - [`Fade`]: stepped opacity effect driven by the same ticks
//!
//! Everything here is advanced by `diff` milliseconds and stays exact under
//! arbitrarily large diffs.

mod fade;
mod frame;
mod sequencer;

pub use fade::{Fade, FadeStep};
pub use frame::{AnimationFrame, FrameDef, FrameSequence, Playback, SequenceDef};
pub use sequencer::{Advance, FrameSequencer};
