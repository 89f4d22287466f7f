use crate::paint::Color;
use crate::scene::{Element, Node, ZIndex};
use crate::surface::DynSurface;
use crate::time::Tick;

/// Solid rectangle with an optional outline. Backgrounds, highlights, debug boxes.
#[derive(Debug, Clone)]
pub struct Block {
    node: Node,
    fill: Color,
    outline: Option<Color>,
}

impl Block {
    pub fn new(x: f32, y: f32, width: f32, height: f32, fill: Color) -> Self {
        Self { node: Node::new(x, y, width, height), fill, outline: None }
    }

    pub fn with_z(mut self, z: impl Into<ZIndex>) -> Self {
        self.node = self.node.with_z(z);
        self
    }

    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = Some(color);
        self
    }

    #[inline]
    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn set_fill(&mut self, color: Color) {
        if color != self.fill {
            self.fill = color;
            self.node.mark_dirty();
        }
    }
}

impl Element for Block {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn render(&mut self, surface: &mut DynSurface, _tick: Tick) -> anyhow::Result<()> {
        let bounds = self.node.bounds();
        let opacity = self.node.opacity();
        if opacity < 1.0 {
            surface.save();
            surface.set_global_alpha(opacity);
        }
        surface.set_fill_style(self.fill);
        surface.fill_rect(bounds);
        if let Some(outline) = self.outline {
            surface.set_stroke_style(outline);
            surface.stroke_rect(bounds);
        }
        if opacity < 1.0 {
            surface.restore();
        }
        Ok(())
    }
}
