use crate::assets::ImageHandle;
use crate::coords::Rect;
use crate::paint::{Color, TextAlign, TextBaseline};

use super::Canvas;

/// One call received by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCmd {
    ClearRect(Rect),
    FillRect(Rect),
    StrokeRect(Rect),
    DrawImage { image: String, src: Rect, dst: Rect },
    FillText { text: String, x: f32, y: f32 },
    Save,
    Restore,
    Translate(f32, f32),
    Scale(f32, f32),
    Rotate(f32),
    GlobalAlpha(f32),
    ImageSmoothing(bool),
    FillStyle(Color),
    StrokeStyle(Color),
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
}

impl CanvasCmd {
    /// `true` for commands that put pixels on (or remove them from) the canvas.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            CanvasCmd::ClearRect(_)
                | CanvasCmd::FillRect(_)
                | CanvasCmd::StrokeRect(_)
                | CanvasCmd::DrawImage { .. }
                | CanvasCmd::FillText { .. }
        )
    }
}

/// Canvas that records every call in arrival order instead of drawing.
///
/// Used as the test backend and for frame diagnostics. Recording is append-only;
/// call [`take`](Self::take) between ticks to inspect one frame at a time.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<CanvasCmd>,
}

impl RecordingCanvas {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn commands(&self) -> &[CanvasCmd] {
        &self.commands
    }

    /// Returns the recorded commands and starts a fresh recording.
    pub fn take(&mut self) -> Vec<CanvasCmd> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded commands that touch pixels, skipping state changes.
    pub fn draws(&self) -> impl Iterator<Item = &CanvasCmd> {
        self.commands.iter().filter(|c| c.is_draw())
    }

    /// Ids of drawn images, in draw order.
    pub fn drawn_images(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                CanvasCmd::DrawImage { image, .. } => Some(image.as_str()),
                _ => None,
            })
            .collect()
    }

    #[inline]
    fn record(&mut self, cmd: CanvasCmd) {
        self.commands.push(cmd);
    }
}

impl Canvas for RecordingCanvas {
    fn clear_rect(&mut self, rect: Rect) {
        self.record(CanvasCmd::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.record(CanvasCmd::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.record(CanvasCmd::StrokeRect(rect));
    }

    fn draw_image(&mut self, image: &ImageHandle, src: Rect, dst: Rect) {
        self.record(CanvasCmd::DrawImage { image: image.id().to_owned(), src, dst });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.record(CanvasCmd::FillText { text: text.to_owned(), x, y });
    }

    fn save(&mut self) {
        self.record(CanvasCmd::Save);
    }

    fn restore(&mut self) {
        self.record(CanvasCmd::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.record(CanvasCmd::Translate(x, y));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.record(CanvasCmd::Scale(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.record(CanvasCmd::Rotate(radians));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.record(CanvasCmd::GlobalAlpha(alpha));
    }

    fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.record(CanvasCmd::ImageSmoothing(enabled));
    }

    fn set_fill_style(&mut self, color: Color) {
        self.record(CanvasCmd::FillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.record(CanvasCmd::StrokeStyle(color));
    }

    fn set_font(&mut self, font: &str) {
        self.record(CanvasCmd::Font(font.to_owned()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.record(CanvasCmd::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.record(CanvasCmd::TextBaseline(baseline));
    }
}
