//! Layers: one drawing surface plus the elements painted onto it.
//!
//! Each tick runs `update → prerender → render → postrender`:
//! - update: elements advance and report changes; the dirty set is rebuilt
//! - prerender: full clear when needed, then the staged viewport is applied
//! - render: stale regions are erased and dirty elements repainted in z order
//! - postrender: every dirty flag is reset
//!
//! Only this module decides what gets redrawn; elements only say whether they
//! changed.

mod config;
mod pipeline;

pub use config::{LayerConfig, LayerKind};
pub use pipeline::{Layer, RenderStats};
