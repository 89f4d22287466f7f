use crate::paint::{Color, TextStyle};
use crate::scene::{Element, Node, ZIndex};
use crate::surface::DynSurface;
use crate::time::Tick;

/// Single line of text anchored at the node position.
///
/// Text metrics belong to the host, so the node size is whatever the caller
/// declares; it is only used for dirty-region clearing and hit testing.
#[derive(Debug, Clone)]
pub struct Label {
    node: Node,
    text: String,
    color: Color,
    style: Option<TextStyle>,
}

impl Label {
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            node: Node::new(x, y, width, height),
            text: text.into(),
            color: Color::black(),
            style: None,
        }
    }

    pub fn with_z(mut self, z: impl Into<ZIndex>) -> Self {
        self.node = self.node.with_z(z);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Overrides the layer's text style for this label.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.node.mark_dirty();
        }
    }
}

impl Element for Label {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn render(&mut self, surface: &mut DynSurface, _tick: Tick) -> anyhow::Result<()> {
        surface.save();
        if let Some(style) = &self.style {
            surface.set_font(&style.font);
            surface.set_text_align(style.align);
            surface.set_text_baseline(style.baseline);
        }
        surface.set_global_alpha(self.node.opacity());
        surface.set_fill_style(self.color);
        let p = self.node.position();
        surface.fill_text(&self.text, p.x, p.y);
        surface.restore();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::TextAlign;
    use crate::surface::{CanvasCmd, DrawingSurface, RecordingCanvas};

    #[test]
    fn style_override_is_scoped_to_the_label() {
        let style = TextStyle { font: "12px monospace".to_owned(), align: TextAlign::Center, ..TextStyle::default() };
        let mut l = Label::new("hp 10", 4.0, 8.0, 40.0, 12.0).with_style(style);
        let mut s = DrawingSurface::new(RecordingCanvas::new(), 100.0, 100.0).unwrap();
        l.render(&mut s, Tick::default()).unwrap();

        let cmds = s.canvas().commands();
        assert_eq!(cmds.first(), Some(&CanvasCmd::Save));
        assert!(cmds.contains(&CanvasCmd::Font("12px monospace".to_owned())));
        assert!(cmds.contains(&CanvasCmd::FillText { text: "hp 10".to_owned(), x: 4.0, y: 8.0 }));
        assert_eq!(cmds.last(), Some(&CanvasCmd::Restore));
    }

    #[test]
    fn set_text_marks_dirty_on_change() {
        let mut l = Label::new("a", 0.0, 0.0, 10.0, 10.0);
        l.node_mut().clear_dirty();
        l.set_text("a");
        assert!(!l.node().is_dirty());
        l.set_text("b");
        assert!(l.node().is_dirty());
    }
}
