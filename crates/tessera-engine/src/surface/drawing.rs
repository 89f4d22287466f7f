use crate::assets::ImageHandle;
use crate::coords::{Rect, Vec2, Viewport};
use crate::error::ConfigError;
use crate::paint::{Color, TextAlign, TextBaseline};

use super::Canvas;

/// Surface handed to elements while they render.
///
/// Layers own a `DrawingSurface<C>` for their concrete canvas and lend it out as
/// this unsized form, so the element trait stays object safe.
pub type DynSurface = DrawingSurface<dyn Canvas>;

/// Viewport-aware, culling wrapper around a raw [`Canvas`].
///
/// Two drawing paths exist:
/// - viewport-relative (`fill_rect`, `draw_image`, ...): coordinates are local, the
///   viewport offset is added, and out-of-view calls are dropped
/// - already-transformed (`*_with_translation`): for callers inside their own
///   `save`/`translate`/`rotate` sequence; coordinates go through untouched and are
///   not culled (the caller culls its world bounds before transforming)
///
/// Culling only gates calls. It never clips or rewrites coordinates.
pub struct DrawingSurface<C: ?Sized> {
    width: f32,
    height: f32,
    viewport: Viewport,
    image_smoothing: bool,
    canvas: C,
}

impl<C: Canvas> DrawingSurface<C> {
    pub fn new(canvas: C, width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            viewport: Viewport::default(),
            image_smoothing: true,
            canvas,
        })
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DrawingSurface<C> {
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Applies a viewport immediately.
    ///
    /// Layers never call this mid-frame; they stage viewport changes and apply them
    /// at the start of prerender.
    #[inline]
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[inline]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    #[inline]
    pub fn image_smoothing_enabled(&self) -> bool {
        self.image_smoothing
    }

    /// Pass-through flag. Does not schedule a redraw on its own.
    pub fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.image_smoothing = enabled;
        self.canvas.set_image_smoothing_enabled(enabled);
    }

    /// `true` when local `rect`, once offset by the viewport, lies entirely outside
    /// `[-width, width] × [-height, height]`.
    pub fn is_out_of_view(&self, rect: Rect) -> bool {
        let r = rect.translated(self.viewport.offset());
        let max = r.max();
        r.origin.x > self.width
            || r.origin.y > self.height
            || max.x < -self.width
            || max.y < -self.height
    }

    #[inline]
    fn to_canvas(&self, rect: Rect) -> Rect {
        rect.translated(self.viewport.offset())
    }

    /// Clears the whole canvas, independent of the viewport.
    pub fn clear(&mut self) {
        self.canvas.clear_rect(Rect::new(0.0, 0.0, self.width, self.height));
    }

    pub fn clear_rect(&mut self, rect: Rect) {
        if self.is_out_of_view(rect) {
            return;
        }
        let r = self.to_canvas(rect);
        self.canvas.clear_rect(r);
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        if self.is_out_of_view(rect) {
            return;
        }
        let r = self.to_canvas(rect);
        self.canvas.fill_rect(r);
    }

    pub fn stroke_rect(&mut self, rect: Rect) {
        if self.is_out_of_view(rect) {
            return;
        }
        let r = self.to_canvas(rect);
        self.canvas.stroke_rect(r);
    }

    pub fn draw_image(&mut self, image: &ImageHandle, src: Rect, dst: Rect) {
        if self.is_out_of_view(dst) {
            return;
        }
        let dst = self.to_canvas(dst);
        self.canvas.draw_image(image, src, dst);
    }

    /// Text extent is unknown to the engine, so only the anchor point is culled.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        if self.is_out_of_view(Rect::new(x, y, 0.0, 0.0)) {
            return;
        }
        let o = self.viewport.offset();
        self.canvas.fill_text(text, x + o.x, y + o.y);
    }

    /// Draws in the caller's current transform; no viewport, no culling.
    pub fn draw_image_with_translation(&mut self, image: &ImageHandle, src: Rect, dst: Rect) {
        self.canvas.draw_image(image, src, dst);
    }

    /// Fills in the caller's current transform; no viewport, no culling.
    pub fn fill_rect_with_translation(&mut self, rect: Rect) {
        self.canvas.fill_rect(rect);
    }

    /// Fills text in the caller's current transform; no viewport, no culling.
    pub fn fill_text_with_translation(&mut self, text: &str, x: f32, y: f32) {
        self.canvas.fill_text(text, x, y);
    }

    /// Translates by a local offset; the viewport is folded in so transformed draws
    /// scroll with everything else.
    pub fn translate(&mut self, x: f32, y: f32) {
        let o = self.viewport.offset();
        self.canvas.translate(x + o.x, y + o.y);
    }

    #[inline]
    pub fn save(&mut self) {
        self.canvas.save();
    }

    #[inline]
    pub fn restore(&mut self) {
        self.canvas.restore();
    }

    #[inline]
    pub fn scale(&mut self, x: f32, y: f32) {
        self.canvas.scale(x, y);
    }

    #[inline]
    pub fn rotate(&mut self, radians: f32) {
        self.canvas.rotate(radians);
    }

    #[inline]
    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.canvas.set_global_alpha(alpha.clamp(0.0, 1.0));
    }

    #[inline]
    pub fn set_fill_style(&mut self, color: Color) {
        self.canvas.set_fill_style(color);
    }

    #[inline]
    pub fn set_stroke_style(&mut self, color: Color) {
        self.canvas.set_stroke_style(color);
    }

    #[inline]
    pub fn set_font(&mut self, font: &str) {
        self.canvas.set_font(font);
    }

    #[inline]
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.canvas.set_text_align(align);
    }

    #[inline]
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.canvas.set_text_baseline(baseline);
    }
}
