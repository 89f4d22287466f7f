//! Style model passed through to the canvas.
//!
//! Scope:
//! - fill/stroke colors
//! - text alignment and baseline
//!
//! Geometry types remain in `coords`.

pub mod color;
mod text;

pub use color::Color;
pub use text::{TextAlign, TextBaseline, TextStyle};
