use serde::Deserialize;

use crate::coords::Rect;
use crate::error::ConfigError;

/// One timed visual frame: a source region plus an optional duration override.
///
/// Frames without an override take the sequence's default duration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationFrame {
    region: Rect,
    duration: Option<u64>,
}

impl AnimationFrame {
    #[inline]
    pub const fn new(region: Rect) -> Self {
        Self { region, duration: None }
    }

    /// Frame that holds for `duration` ms regardless of the sequence default.
    #[inline]
    pub const fn with_duration(region: Rect, duration: u64) -> Self {
        Self { region, duration: Some(duration) }
    }

    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    #[inline]
    pub fn duration_override(&self) -> Option<u64> {
        self.duration
    }
}

/// What happens after the last frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Wrap back to frame 0 (walk cycles).
    #[default]
    Loop,
    /// Stop on the last frame and report completion (attacks, casts).
    Once,
}

/// Validated, immutable frame sequence.
///
/// Effective durations are resolved once at construction: a per-frame override
/// wins over the sequence default. Every effective duration is non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    frames: Vec<AnimationFrame>,
    durations: Vec<u64>,
    starts: Vec<u64>,
    total: u64,
    playback: Playback,
}

impl FrameSequence {
    pub fn new(
        frames: Vec<AnimationFrame>,
        default_duration: u64,
        playback: Playback,
    ) -> Result<Self, ConfigError> {
        if frames.is_empty() {
            return Err(ConfigError::EmptySequence);
        }

        let mut durations = Vec::with_capacity(frames.len());
        let mut starts = Vec::with_capacity(frames.len());
        let mut total = 0u64;
        for (index, frame) in frames.iter().enumerate() {
            let d = frame.duration.unwrap_or(default_duration);
            if d == 0 {
                return Err(ConfigError::ZeroDurationFrame { index });
            }
            starts.push(total);
            durations.push(d);
            total = total.saturating_add(d);
        }

        Ok(Self { frames, durations, starts, total, playback })
    }

    /// Single-frame sequence for static images.
    pub fn still(region: Rect) -> Self {
        Self {
            frames: vec![AnimationFrame::new(region)],
            durations: vec![u64::MAX],
            starts: vec![0],
            total: u64::MAX,
            playback: Playback::Loop,
        }
    }

    /// Sequence of equal-sized regions laid out left to right starting at `first`.
    pub fn strip(
        first: Rect,
        count: usize,
        default_duration: u64,
        playback: Playback,
    ) -> Result<Self, ConfigError> {
        let frames = (0..count)
            .map(|i| {
                let x = first.origin.x + first.size.x * i as f32;
                AnimationFrame::new(Rect::new(x, first.origin.y, first.size.x, first.size.y))
            })
            .collect();
        Self::new(frames, default_duration, playback)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn playback(&self) -> Playback {
        self.playback
    }

    #[inline]
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    #[inline]
    pub fn frame(&self, index: usize) -> Option<&AnimationFrame> {
        self.frames.get(index)
    }

    /// Effective duration of frame `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn duration(&self, index: usize) -> u64 {
        self.durations[index]
    }

    /// Offset of frame `index` from the start of the sequence.
    #[inline]
    pub(crate) fn start_of(&self, index: usize) -> u64 {
        self.starts[index]
    }

    /// Sum of all effective durations.
    #[inline]
    pub fn total_duration(&self) -> u64 {
        self.total
    }
}

/// Serialized form of a single frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub duration: Option<u64>,
}

/// Serialized form of a [`FrameSequence`].
///
/// ```json
/// { "duration": 100, "playback": "once",
///   "frames": [ { "x": 0, "y": 0, "w": 64, "h": 64 },
///               { "x": 64, "y": 0, "w": 64, "h": 64, "duration": 400 } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SequenceDef {
    pub frames: Vec<FrameDef>,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub playback: Playback,
}

impl TryFrom<SequenceDef> for FrameSequence {
    type Error = ConfigError;

    fn try_from(def: SequenceDef) -> Result<Self, Self::Error> {
        let frames = def
            .frames
            .into_iter()
            .map(|f| AnimationFrame {
                region: Rect::new(f.x, f.y, f.w, f.h),
                duration: f.duration,
            })
            .collect();
        FrameSequence::new(frames, def.duration, def.playback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(i: f32) -> Rect {
        Rect::new(i * 16.0, 0.0, 16.0, 16.0)
    }

    #[test]
    fn frame_override_wins_over_default() {
        let seq = FrameSequence::new(
            vec![
                AnimationFrame::new(cell(0.0)),
                AnimationFrame::with_duration(cell(1.0), 500),
                AnimationFrame::new(cell(2.0)),
            ],
            100,
            Playback::Once,
        )
        .unwrap();

        assert_eq!(seq.duration(0), 100);
        assert_eq!(seq.duration(1), 500);
        assert_eq!(seq.duration(2), 100);
        assert_eq!(seq.total_duration(), 700);
        assert_eq!(seq.start_of(2), 600);
    }

    #[test]
    fn zero_duration_fails_fast() {
        let err = FrameSequence::new(
            vec![AnimationFrame::with_duration(cell(0.0), 50), AnimationFrame::new(cell(1.0))],
            0,
            Playback::Loop,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDurationFrame { index: 1 });
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(
            FrameSequence::new(Vec::new(), 100, Playback::Loop).unwrap_err(),
            ConfigError::EmptySequence
        );
    }

    #[test]
    fn strip_lays_regions_out_horizontally() {
        let seq = FrameSequence::strip(Rect::new(0.0, 64.0, 64.0, 64.0), 3, 80, Playback::Loop).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.frames()[2].region(), Rect::new(128.0, 64.0, 64.0, 64.0));
    }

    #[test]
    fn sequence_def_deserializes_with_overrides() {
        let json = r#"{
            "duration": 100,
            "playback": "once",
            "frames": [
                { "x": 0, "y": 0, "w": 64, "h": 64 },
                { "x": 64, "y": 0, "w": 64, "h": 64, "duration": 400 }
            ]
        }"#;
        let def: SequenceDef = serde_json::from_str(json).unwrap();
        let seq = FrameSequence::try_from(def).unwrap();
        assert_eq!(seq.playback(), Playback::Once);
        assert_eq!(seq.duration(0), 100);
        assert_eq!(seq.duration(1), 400);
    }
}
