//! Drawing surface subsystem.
//!
//! Responsibilities:
//! - define the raw immediate-mode [`Canvas`] contract implemented by host backends
//! - wrap a canvas with viewport offsetting and out-of-view culling ([`DrawingSurface`])
//! - provide a recording backend for tests and diagnostics ([`RecordingCanvas`])
//!
//! Nothing in here knows about scenes, elements or layers.

mod canvas;
mod drawing;
mod recording;

pub use canvas::Canvas;
pub use drawing::{DrawingSurface, DynSurface};
pub use recording::{CanvasCmd, RecordingCanvas};
