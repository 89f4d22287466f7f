use crate::assets::ImageHandle;
use crate::coords::Rect;
use crate::paint::{Color, TextAlign, TextBaseline};

/// Raw immediate-mode 2D drawing context supplied by the host.
///
/// Coordinates are canvas coordinates: no viewport, no culling. Engine code never
/// calls a canvas directly; it always goes through [`DrawingSurface`](super::DrawingSurface).
///
/// Implementations mirror an HTML-style 2D context. Backends that cannot honor a
/// style setter may ignore it.
pub trait Canvas {
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);

    /// Copies `src` (image pixels) into `dst` (canvas coordinates), scaling as needed.
    fn draw_image(&mut self, image: &ImageHandle, src: Rect, dst: Rect);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_image_smoothing_enabled(&mut self, enabled: bool);
    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
}
