//! Time subsystem.
//!
//! All pipeline timing is expressed as a [`Tick`]: a monotonic `time` plus the
//! non-negative `diff` since the previous tick, both in whole milliseconds.
//! Intended usage:
//! - one `FrameClock` per host loop
//! - call `tick()` once per frame and pass the result to `Panel::tick`

mod frame_clock;

pub use frame_clock::{FrameClock, Tick};
