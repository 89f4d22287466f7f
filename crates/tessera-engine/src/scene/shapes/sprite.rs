use std::f32::consts::PI;
use std::sync::Arc;

use anyhow::ensure;

use crate::anim::{FrameSequence, FrameSequencer};
use crate::assets::ImageHandle;
use crate::coords::Rect;
use crate::event::SceneEvent;
use crate::scene::{Element, Node, UpdateCtx, ZIndex};
use crate::surface::DynSurface;
use crate::time::Tick;

/// Image-backed element, optionally animated through a [`FrameSequence`].
///
/// Plain sprites draw through the viewport-relative path. Rotated or flipped
/// sprites cull their world bounds first, then draw inside their own
/// `save`/`translate`/`rotate`/`scale` block with the already-transformed path.
#[derive(Debug, Clone)]
pub struct Sprite {
    node: Node,
    image: ImageHandle,
    frames: FrameSequencer,
    playing: bool,
    rotation: f32,
    flip_x: bool,
    flip_y: bool,
}

impl Sprite {
    /// Animated sprite. The node takes the size of the first frame.
    pub fn new(image: ImageHandle, sequence: impl Into<Arc<FrameSequence>>) -> Self {
        let frames = FrameSequencer::new(sequence);
        let size = frames.region().size;
        Self {
            node: Node::new(0.0, 0.0, size.x, size.y),
            image,
            frames,
            playing: true,
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Static sprite showing `region` of `image`.
    pub fn still(image: ImageHandle, region: Rect) -> Self {
        Self::new(image, FrameSequence::still(region))
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.node.set_position(x, y);
        self
    }

    pub fn with_z(mut self, z: impl Into<ZIndex>) -> Self {
        self.node = self.node.with_z(z);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.node = self.node.with_visible(false);
        self
    }

    #[inline]
    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    #[inline]
    pub fn frames(&self) -> &FrameSequencer {
        &self.frames
    }

    /// Swaps the animation and restarts it from frame 0.
    pub fn set_sequence(&mut self, sequence: impl Into<Arc<FrameSequence>>) {
        self.frames = FrameSequencer::new(sequence);
        self.node.mark_dirty();
    }

    /// Rewinds the current animation to frame 0.
    pub fn restart(&mut self) {
        if self.frames.index() != 0 {
            self.node.mark_dirty();
        }
        self.frames.restart();
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_rotation(&mut self, radians: f32) {
        let r = radians.rem_euclid(2.0 * PI);
        if r != self.rotation {
            self.rotation = r;
            self.node.mark_dirty();
        }
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        if (flip_x, flip_y) != (self.flip_x, self.flip_y) {
            self.flip_x = flip_x;
            self.flip_y = flip_y;
            self.node.mark_dirty();
        }
    }

    fn is_transformed(&self) -> bool {
        self.rotation != 0.0 || self.flip_x || self.flip_y
    }

    /// Bounds including rotation, so culling never drops a visible corner.
    fn cull_bounds(&self) -> Rect {
        let b = self.node.bounds();
        if self.rotation == 0.0 {
            return b;
        }
        let half_diag = b.size.length() / 2.0;
        let cx = b.origin.x + b.size.x / 2.0;
        let cy = b.origin.y + b.size.y / 2.0;
        Rect::new(cx - half_diag, cy - half_diag, half_diag * 2.0, half_diag * 2.0)
    }
}

impl Element for Sprite {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        if !self.playing {
            return false;
        }
        let step = self.frames.advance(ctx.tick.diff);
        if step.completed {
            ctx.emit(SceneEvent::AnimationDone { element: ctx.id });
        }
        step.frame_changed
    }

    fn bounds(&self) -> Rect {
        self.cull_bounds()
    }

    fn render(&mut self, surface: &mut DynSurface, _tick: Tick) -> anyhow::Result<()> {
        let region = self.frames.region();
        let full = self.image.full_region();
        ensure!(
            region.origin.x >= 0.0
                && region.origin.y >= 0.0
                && region.max().x <= full.size.x
                && region.max().y <= full.size.y,
            "frame {} region {:?} lies outside image {}",
            self.frames.index(),
            region,
            self.image
        );

        if surface.is_out_of_view(self.cull_bounds()) {
            return Ok(());
        }

        let bounds = self.node.bounds();
        let opacity = self.node.opacity();
        let translucent = opacity < 1.0;

        if !self.is_transformed() && !translucent {
            surface.draw_image(&self.image, region, bounds);
            return Ok(());
        }

        surface.save();
        if translucent {
            surface.set_global_alpha(opacity);
        }
        if self.is_transformed() {
            let (hw, hh) = (bounds.size.x / 2.0, bounds.size.y / 2.0);
            surface.translate(bounds.origin.x + hw, bounds.origin.y + hh);
            if self.rotation != 0.0 {
                surface.rotate(self.rotation);
            }
            if self.flip_x || self.flip_y {
                surface.scale(
                    if self.flip_x { -1.0 } else { 1.0 },
                    if self.flip_y { -1.0 } else { 1.0 },
                );
            }
            surface.draw_image_with_translation(&self.image, region, Rect::new(-hw, -hh, bounds.size.x, bounds.size.y));
        } else {
            surface.draw_image(&self.image, region, bounds);
        }
        surface.restore();
        Ok(())
    }
}
