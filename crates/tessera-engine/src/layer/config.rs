use crate::paint::{Color, TextStyle};

/// Layer variant. Decides what a full redraw paints before any element.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LayerKind {
    /// Opaque backdrop: the surface is filled with `color` after a full clear, and
    /// erased regions are refilled instead of left transparent.
    Background { color: Color },
    /// Plain transparent layer for sprites and shapes.
    #[default]
    Gfx,
    /// Text layer: `style` and `color` are applied to the canvas after a full clear
    /// so labels without their own style inherit them.
    Text { style: TextStyle, color: Color },
}

/// Construction parameters for a [`Layer`](super::Layer).
#[derive(Debug, Clone)]
pub struct LayerConfig {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    pub kind: LayerKind,
    /// Initial image smoothing; pixel-art layers usually turn it off.
    pub image_smoothing: bool,
}

impl LayerConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_image_smoothing(mut self, enabled: bool) -> Self {
        self.image_smoothing = enabled;
        self
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            kind: LayerKind::Gfx,
            image_smoothing: true,
        }
    }
}
