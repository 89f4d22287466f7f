//! Coordinate and geometry types shared by surfaces, elements and layers.
//!
//! Canonical space:
//! - pixels, origin top-left
//! - +X right, +Y down
//!
//! World coordinates become surface coordinates by adding the layer's [`Viewport`].

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
