/// Horizontal anchor for `fill_text`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

/// Vertical anchor for `fill_text`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

/// Font + alignment applied before text is drawn.
///
/// `font` uses the canvas font shorthand (e.g. `"12px monospace"`); the engine
/// never interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "10px sans-serif".to_owned(),
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
        }
    }
}
