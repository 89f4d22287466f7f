use serde::Deserialize;
use tessera_engine::ConfigError;
use tessera_engine::anim::{AnimationFrame, FrameSequence, Playback};
use tessera_engine::assets::{ImageHandle, ImageStore};
use tessera_engine::coords::Rect;
use tessera_engine::scene::Sprite;

use crate::{Action, ActionSet, Direction};

/// Timing and cell size of an LPC sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LpcConfig {
    /// Edge length of one square cell, in pixels.
    pub frame_size: f32,
    /// Duration of every animated frame.
    pub frame_duration_ms: u64,
    /// Duration of the single stand frame. Only matters to observers of the
    /// sequencer; a one-frame loop never changes region.
    pub stand_duration_ms: u64,
}

impl Default for LpcConfig {
    fn default() -> Self {
        Self { frame_size: 64.0, frame_duration_ms: 100, stand_duration_ms: 1_000 }
    }
}

/// Standard LPC character sheet layout.
///
/// Actions occupy bands of four rows (north, west, south, east) from the top:
/// spellcast, thrust, walk, slash, shoot. `hurt` is a single row below them, shared
/// by every direction. `stand` is the first column of the matching walk row.
#[derive(Debug, Clone)]
pub struct LpcSheet {
    image: ImageHandle,
    config: LpcConfig,
}

impl LpcSheet {
    pub fn new(image: ImageHandle, config: LpcConfig) -> Self {
        Self { image, config }
    }

    /// Resolves `image_id` through `store`.
    pub fn from_store(store: &ImageStore, image_id: &str, config: LpcConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(store.get(image_id)?, config))
    }

    #[inline]
    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    #[inline]
    pub fn config(&self) -> &LpcConfig {
        &self.config
    }

    /// Number of frames `action` has on the sheet.
    pub fn frame_count(action: Action) -> usize {
        match action {
            Action::Stand => 1,
            Action::Spellcast => 7,
            Action::Thrust => 8,
            Action::Walk => 9,
            Action::Slash => 6,
            Action::Shoot => 13,
            Action::Hurt => 6,
        }
    }

    /// Sheet row holding `action` facing `direction`.
    pub fn row(action: Action, direction: Direction) -> usize {
        let band = match action {
            Action::Spellcast => 0,
            Action::Thrust => 1,
            Action::Stand | Action::Walk => 2,
            Action::Slash => 3,
            Action::Shoot => 4,
            Action::Hurt => return 20,
        };
        band * 4 + direction as usize
    }

    pub fn playback(action: Action) -> Playback {
        match action {
            Action::Stand | Action::Walk => Playback::Loop,
            _ => Playback::Once,
        }
    }

    /// Source region of cell `column` for `(action, direction)`.
    pub fn region(&self, action: Action, direction: Direction, column: usize) -> Rect {
        let s = self.config.frame_size;
        Rect::new(column as f32 * s, Self::row(action, direction) as f32 * s, s, s)
    }

    /// Frame sequence for `(action, direction)`.
    pub fn sequence(&self, action: Action, direction: Direction) -> Result<FrameSequence, ConfigError> {
        if action == Action::Stand {
            let frame = AnimationFrame::with_duration(self.region(action, direction, 0), self.config.stand_duration_ms);
            return FrameSequence::new(vec![frame], self.config.stand_duration_ms, Playback::Loop);
        }
        let first = self.region(action, direction, 0);
        FrameSequence::strip(first, Self::frame_count(action), self.config.frame_duration_ms, Self::playback(action))
    }

    fn fits(&self, action: Action, direction: Direction) -> bool {
        let last = self.region(action, direction, Self::frame_count(action) - 1);
        let full = self.image.full_region();
        last.max().x <= full.size.x && last.max().y <= full.size.y
    }

    /// Builds an actor with every action the image is large enough to hold.
    ///
    /// Cropped sheets (e.g. without the shoot band) simply lack those states; the
    /// sheet must at least contain the walk band for the initial `stand` pose.
    pub fn build(&self) -> Result<ActionSet, ConfigError> {
        let mut builder = ActionSet::builder();
        for action in Action::ALL {
            for direction in Direction::ALL {
                if !self.fits(action, direction) {
                    log::debug!("lpc: {} has no room for {action}/{direction}", self.image);
                    continue;
                }
                let sprite = Sprite::new(self.image.clone(), self.sequence(action, direction)?);
                builder = builder.insert(action, direction, sprite);
            }
        }
        log::debug!("lpc: built {} states from {}", builder.len(), self.image);
        builder.build()
    }
}
