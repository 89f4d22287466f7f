use std::any::Any;
use std::fmt;

use crate::anim::Fade;
use crate::coords::{Rect, Vec2};
use crate::event::{EventSink, SceneEvent};
use crate::surface::DynSurface;
use crate::time::Tick;

use super::motion::Motion;
use super::ZIndex;

/// Handle of an element inside its layer.
///
/// Ids are never reused by a layer, so a stale id resolves to nothing instead of
/// aliasing a newer element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(u64);

impl ElementId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometry and per-frame state shared by every element.
///
/// Every setter that changes appearance marks the node dirty. The owning layer
/// clears the flag in postrender.
#[derive(Debug, Clone)]
pub struct Node {
    pos: Vec2,
    size: Vec2,
    scale: Vec2,
    z: ZIndex,
    visible: bool,
    dirty: bool,
    opacity: f32,
    fade: Option<Fade>,
    motion: Motion,
    /// Canvas-space bounds of the last paint, in layer-local coordinates.
    painted: Option<Rect>,
}

impl Node {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            scale: Vec2::new(1.0, 1.0),
            z: ZIndex::default(),
            visible: true,
            dirty: true,
            opacity: 1.0,
            fade: None,
            motion: Motion::default(),
            painted: None,
        }
    }

    /// Sets the initial z-index. Once the element is in a layer, use
    /// `Layer::set_z_index` so the layer can reposition it.
    pub fn with_z(mut self, z: impl Into<ZIndex>) -> Self {
        self.z = z.into();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        let p = Vec2::new(x, y);
        if p != self.pos {
            self.pos = p;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        let s = Vec2::new(width, height);
        if s != self.size {
            self.size = s;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, sx: f32, sy: f32) {
        let s = Vec2::new(sx, sy);
        if s != self.scale {
            self.scale = s;
            self.dirty = true;
        }
    }

    /// Drawn extent: position plus scaled size.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            self.size.x * self.scale.x.abs(),
            self.size.y * self.scale.y.abs(),
        )
    }

    #[inline]
    pub fn z(&self) -> ZIndex {
        self.z
    }

    pub(crate) fn set_z(&mut self, z: ZIndex) {
        if z != self.z {
            self.z = z;
            self.dirty = true;
        }
    }

    // ── visibility ────────────────────────────────────────────────────────

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            self.visible = visible;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        let o = opacity.clamp(0.0, 1.0);
        if o != self.opacity {
            self.opacity = o;
            self.dirty = true;
        }
    }

    /// Starts a stepped opacity change, replacing any running fade.
    pub fn start_fade(&mut self, fade: Fade) {
        self.set_opacity(fade.opacity());
        self.fade = Some(fade);
    }

    pub fn cancel_fade(&mut self) {
        self.fade = None;
    }

    #[inline]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    // ── motion ────────────────────────────────────────────────────────────

    #[inline]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    #[inline]
    pub fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    // ── dirty state ───────────────────────────────────────────────────────

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    #[inline]
    pub(crate) fn painted(&self) -> Option<Rect> {
        self.painted
    }

    #[inline]
    pub(crate) fn set_painted(&mut self, painted: Option<Rect>) {
        self.painted = painted;
    }

    /// Steps fade and motion by one tick, emitting movement notifications.
    ///
    /// Returns `true` if the node changed appearance.
    pub fn step(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        let mut changed = false;

        if let Some(fade) = self.fade.as_mut() {
            let step = fade.step(ctx.tick.diff);
            if step.changed {
                self.opacity = step.opacity;
                changed = true;
            }
            if step.finished {
                self.fade = None;
            }
        }

        let step = self.motion.step(self.pos, ctx.tick.diff);
        if let Some((from, to)) = step.moved {
            self.pos = to;
            changed = true;
            ctx.emit(SceneEvent::Moved { element: ctx.id, from, to });
        }
        if step.stopped {
            ctx.emit(SceneEvent::Stopped { element: ctx.id, at: self.pos });
        }

        if changed {
            self.dirty = true;
        }
        changed
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Per-element view of the current tick, passed to [`Element::update`].
pub struct UpdateCtx<'a> {
    pub tick: Tick,
    /// Id of the element being updated; use it when emitting events.
    pub id: ElementId,
    pub events: &'a mut dyn EventSink,
}

impl<'a> UpdateCtx<'a> {
    pub fn new(tick: Tick, id: ElementId, events: &'a mut dyn EventSink) -> Self {
        Self { tick, id, events }
    }

    #[inline]
    pub fn emit(&mut self, event: SceneEvent) {
        self.events.emit(event);
    }
}

/// Capability contract for anything a layer can own and paint.
///
/// Implementations keep their geometry in a [`Node`]. The layer steps the node's
/// fade and motion before calling [`update`](Self::update), and only calls
/// [`render`](Self::render) for elements that are dirty (or when the whole layer
/// is being redrawn).
///
/// # Implementing a custom element
///
/// ```rust,ignore
/// struct Marker { node: Node }
///
/// impl Element for Marker {
///     fn node(&self) -> &Node { &self.node }
///     fn node_mut(&mut self) -> &mut Node { &mut self.node }
///     fn render(&mut self, surface: &mut DynSurface, _tick: Tick) -> anyhow::Result<()> {
///         surface.fill_rect(self.node.bounds());
///         Ok(())
///     }
/// }
/// ```
pub trait Element: Any {
    fn node(&self) -> &Node;
    fn node_mut(&mut self) -> &mut Node;

    /// Advances internal state for this tick. Returns `true` if the element's
    /// appearance changed and it must be repainted.
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        let _ = ctx;
        false
    }

    /// Paints the element. Only called for visible elements.
    ///
    /// An error aborts this element's paint for the current tick only.
    fn render(&mut self, surface: &mut DynSurface, tick: Tick) -> anyhow::Result<()>;

    #[inline]
    fn is_dirty(&self) -> bool {
        self.node().is_dirty()
    }

    /// Area the element covers when painted.
    #[inline]
    fn bounds(&self) -> Rect {
        self.node().bounds()
    }
}
