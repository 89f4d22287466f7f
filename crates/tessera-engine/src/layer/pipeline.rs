use std::any::Any;
use std::collections::{HashMap, HashSet};

use crate::coords::{Rect, Vec2, Viewport};
use crate::error::ConfigError;
use crate::event::EventSink;
use crate::scene::{Element, ElementId, UpdateCtx, ZIndex, ZOrder};
use crate::surface::{Canvas, DrawingSurface};
use crate::time::Tick;

use super::{LayerConfig, LayerKind};

/// Counters for one `render` pass.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderStats {
    /// The whole surface was cleared and every element considered.
    pub full: bool,
    /// Stale regions erased before painting.
    pub erased: usize,
    /// Elements whose render succeeded.
    pub painted: usize,
    /// Elements whose render returned an error and were skipped.
    pub failed: usize,
}

/// Drawing surface plus the elements painted on it, with dirty-region tracking.
///
/// Elements are added and removed by the host; the layer never does either on its
/// own. Only elements that changed are repainted unless the layer is fully dirty
/// (first frame, viewport change, smoothing change, explicit request).
pub struct Layer<C: Canvas + 'static> {
    kind: LayerKind,
    surface: DrawingSurface<C>,
    elements: HashMap<ElementId, Box<dyn Element>>,
    order: ZOrder,
    /// Elements to repaint this tick, rebuilt by every `update`.
    dirty: HashSet<ElementId>,
    /// Regions vacated by removed elements, erased on the next partial render.
    vacated: Vec<Rect>,
    fully_dirty: bool,
    pending_viewport: Option<Viewport>,
    next_id: u64,
}

impl<C: Canvas + 'static> Layer<C> {
    pub fn new(canvas: C, config: LayerConfig) -> Result<Self, ConfigError> {
        let mut surface = DrawingSurface::new(canvas, config.width, config.height)?;
        surface.set_image_smoothing_enabled(config.image_smoothing);
        Ok(Self {
            kind: config.kind,
            surface,
            elements: HashMap::new(),
            order: ZOrder::new(),
            dirty: HashSet::new(),
            vacated: Vec::new(),
            fully_dirty: true,
            pending_viewport: None,
            next_id: 1,
        })
    }

    #[inline]
    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    #[inline]
    pub fn surface(&self) -> &DrawingSurface<C> {
        &self.surface
    }

    #[inline]
    pub fn canvas(&self) -> &C {
        self.surface.canvas()
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut C {
        self.surface.canvas_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn is_fully_dirty(&self) -> bool {
        self.fully_dirty
    }

    /// Forces the next render to clear the surface and repaint every element.
    pub fn mark_fully_dirty(&mut self) {
        self.fully_dirty = true;
    }

    // ── elements ──────────────────────────────────────────────────────────

    /// Adds an element; it is painted on the next tick.
    pub fn add<E: Element>(&mut self, element: E) -> ElementId {
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;

        let mut element: Box<dyn Element> = Box::new(element);
        element.node_mut().mark_dirty();
        element.node_mut().set_painted(None);
        self.order.insert(id, element.node().z());
        self.elements.insert(id, element);
        log::trace!("layer: added element {id}");
        id
    }

    /// Removes an element and schedules its last painted area for erasing.
    pub fn remove(&mut self, id: ElementId) -> Result<Box<dyn Element>, ConfigError> {
        let element = self
            .elements
            .remove(&id)
            .ok_or(ConfigError::UnknownElement { id: id.raw() })?;
        self.order.remove(id);
        self.dirty.remove(&id);
        if let Some(painted) = element.node().painted() {
            self.vacated.push(painted);
        }
        log::trace!("layer: removed element {id}");
        Ok(element)
    }

    #[inline]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&dyn Element> {
        self.elements.get(&id).map(|e| e.as_ref())
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut dyn Element> {
        self.elements.get_mut(&id).map(|e| e.as_mut())
    }

    /// Typed access to an element added as `T`.
    pub fn get_as<T: Element>(&self, id: ElementId) -> Option<&T> {
        let element: &dyn Element = self.elements.get(&id)?.as_ref();
        (element as &dyn Any).downcast_ref::<T>()
    }

    /// Typed mutable access to an element added as `T`.
    pub fn get_mut_as<T: Element>(&mut self, id: ElementId) -> Option<&mut T> {
        let element: &mut dyn Element = self.elements.get_mut(&id)?.as_mut();
        (element as &mut dyn Any).downcast_mut::<T>()
    }

    /// Changes an element's z-index and re-establishes its place in paint order.
    pub fn set_z_index(&mut self, id: ElementId, z: impl Into<ZIndex>) -> Result<(), ConfigError> {
        let z = z.into();
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(ConfigError::UnknownElement { id: id.raw() })?;
        if element.node().z() == z {
            return Ok(());
        }
        element.node_mut().set_z(z);
        self.order.reposition(id, z);
        Ok(())
    }

    /// Elements in paint order (back-to-front).
    pub fn iter_in_paint_order(&self) -> impl Iterator<Item = (ElementId, &dyn Element)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(&id).map(|e| (id, e.as_ref())))
    }

    /// Visible elements under `point` (world coordinates), topmost first.
    pub fn elements_at(&self, point: Vec2) -> Vec<ElementId> {
        self.order
            .iter()
            .rev()
            .filter(|id| {
                self.elements
                    .get(id)
                    .is_some_and(|e| e.node().is_visible() && e.bounds().contains(point))
            })
            .collect()
    }

    // ── surface state ─────────────────────────────────────────────────────

    /// Viewport currently applied to the surface.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    #[inline]
    pub fn pending_viewport(&self) -> Option<Viewport> {
        self.pending_viewport
    }

    /// Stages a viewport change. It takes effect at the start of the next
    /// prerender; staging again before then replaces the pending value.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            log::debug!("layer: ignoring non-finite viewport {viewport:?}");
            return;
        }
        self.pending_viewport = Some(viewport);
        self.fully_dirty = true;
    }

    /// Changes image smoothing and schedules a full redraw so the change shows.
    pub fn set_image_smoothing(&mut self, enabled: bool) {
        if self.surface.image_smoothing_enabled() != enabled {
            self.surface.set_image_smoothing_enabled(enabled);
            self.fully_dirty = true;
        }
    }

    // ── pipeline ──────────────────────────────────────────────────────────

    /// Runs one full tick: update, prerender, render, postrender.
    pub fn tick(&mut self, tick: Tick, events: &mut dyn EventSink) -> RenderStats {
        self.update(tick, events);
        self.prerender(tick);
        let stats = self.render(tick);
        self.postrender(tick);
        stats
    }

    /// Advances every element and rebuilds the dirty set.
    pub fn update(&mut self, tick: Tick, events: &mut dyn EventSink) {
        self.dirty.clear();

        for id in self.order.iter() {
            let Some(element) = self.elements.get_mut(&id) else {
                continue;
            };
            let mut ctx = UpdateCtx::new(tick, id, &mut *events);
            let stepped = element.node_mut().step(&mut ctx);
            let changed = element.update(&mut ctx);

            if self.fully_dirty || stepped || changed || element.is_dirty() {
                element.node_mut().mark_dirty();
                self.dirty.insert(id);
            }
        }

        log::trace!(
            "layer: update t={} diff={} dirty={}/{} full={}",
            tick.time,
            tick.diff,
            self.dirty.len(),
            self.elements.len(),
            self.fully_dirty
        );
    }

    /// Clears the surface when fully dirty, then applies the staged viewport.
    ///
    /// The clear happens under the old viewport, before the new one takes effect.
    pub fn prerender(&mut self, _tick: Tick) {
        if self.fully_dirty {
            self.surface.clear();
            self.vacated.clear();
            self.paint_backdrop();
        }
        if let Some(viewport) = self.pending_viewport.take() {
            log::debug!("layer: viewport {:?} -> {:?}", self.surface.viewport(), viewport);
            self.surface.set_viewport(viewport);
        }
    }

    /// Paints dirty elements (all elements when fully dirty) in ascending z order.
    ///
    /// A failing element is logged and skipped; the rest of the pass continues.
    pub fn render(&mut self, tick: Tick) -> RenderStats {
        let full = self.fully_dirty;
        let mut stats = RenderStats { full, ..RenderStats::default() };

        // Elements touched after update still count, so their flags are never
        // cleared without a paint.
        let mut repaint: HashSet<ElementId> = self
            .order
            .iter()
            .filter(|id| {
                full || self.dirty.contains(id)
                    || self.elements.get(id).is_some_and(|e| e.is_dirty())
            })
            .collect();

        if !full {
            let stale = self.collect_damage(&mut repaint);
            for rect in &stale {
                erase(&mut self.surface, &self.kind, *rect);
            }
            stats.erased = stale.len();
        }

        let targets: Vec<ElementId> = self.order.iter().filter(|id| repaint.contains(id)).collect();

        for id in targets {
            let Some(element) = self.elements.get_mut(&id) else {
                continue;
            };
            if !element.node().is_visible() {
                element.node_mut().set_painted(None);
                continue;
            }

            match element.render(&mut self.surface, tick) {
                Ok(()) => stats.painted += 1,
                Err(err) => {
                    stats.failed += 1;
                    log::warn!("layer: element {id} failed to render: {err:#}");
                }
            }
            // Even a failed paint may have touched pixels; erase them next time.
            let bounds = element.bounds();
            element.node_mut().set_painted(Some(bounds));
        }

        stats
    }

    /// Resets the fully-dirty flag, every element's dirty flag and the dirty set.
    pub fn postrender(&mut self, _tick: Tick) {
        self.fully_dirty = false;
        for element in self.elements.values_mut() {
            element.node_mut().clear_dirty();
        }
        self.dirty.clear();
    }

    /// Regions to erase before a partial repaint, growing `repaint` as needed.
    ///
    /// Starts from vacated areas and the last paint of every dirty element. A
    /// clean element whose last paint overlaps an erased area, or the new paint of
    /// an element being repainted, joins the repaint set and its own area is
    /// erased too. Repeats until no further element is drawn in.
    fn collect_damage(&mut self, repaint: &mut HashSet<ElementId>) -> Vec<Rect> {
        let mut stale = std::mem::take(&mut self.vacated);
        let mut damage = Vec::new();
        for id in repaint.iter() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            stale.extend(element.node().painted());
            if element.node().is_visible() {
                damage.push(element.bounds());
            }
        }
        damage.extend(stale.iter().copied());

        loop {
            let mut grown = false;
            for id in self.order.iter() {
                if repaint.contains(&id) {
                    continue;
                }
                let Some(painted) = self.elements.get(&id).and_then(|e| e.node().painted()) else {
                    continue;
                };
                if damage.iter().any(|r| r.intersects(painted)) {
                    repaint.insert(id);
                    stale.push(painted);
                    damage.push(painted);
                    grown = true;
                }
            }
            if !grown {
                break;
            }
        }
        stale
    }

    fn paint_backdrop(&mut self) {
        match &self.kind {
            LayerKind::Gfx => {}
            LayerKind::Background { color } => {
                let vp = self.surface.viewport();
                let whole = Rect::new(-vp.x, -vp.y, self.surface.width(), self.surface.height());
                self.surface.set_fill_style(*color);
                self.surface.fill_rect(whole);
            }
            LayerKind::Text { style, color } => {
                self.surface.set_font(&style.font);
                self.surface.set_text_align(style.align);
                self.surface.set_text_baseline(style.baseline);
                self.surface.set_fill_style(*color);
            }
        }
    }
}

fn erase<C: Canvas + ?Sized>(surface: &mut DrawingSurface<C>, kind: &LayerKind, rect: Rect) {
    surface.clear_rect(rect);
    if let LayerKind::Background { color } = kind {
        surface.set_fill_style(*color);
        surface.fill_rect(rect);
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;
    use crate::anim::{FrameSequence, Playback};
    use crate::assets::ImageHandle;
    use crate::event::{NullSink, SceneEvent};
    use crate::paint::Color;
    use crate::scene::{Block, Node, Sprite};
    use crate::surface::{CanvasCmd, DynSurface, RecordingCanvas};

    fn layer() -> Layer<RecordingCanvas> {
        let mut l = Layer::new(RecordingCanvas::new(), LayerConfig::new(200.0, 100.0)).unwrap();
        l.canvas_mut().take();
        l
    }

    fn still(id: &str, z: i32) -> Sprite {
        Sprite::still(ImageHandle::new(id, 16, 16), Rect::new(0.0, 0.0, 16.0, 16.0)).with_z(z)
    }

    /// Element whose render always fails.
    struct Broken {
        node: Node,
    }

    impl Element for Broken {
        fn node(&self) -> &Node {
            &self.node
        }

        fn node_mut(&mut self) -> &mut Node {
            &mut self.node
        }

        fn render(&mut self, _surface: &mut DynSurface, _tick: Tick) -> anyhow::Result<()> {
            bail!("texture went away")
        }
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn renders_in_ascending_z() {
        let mut l = layer();
        l.add(still("z0", 0));
        l.add(still("z5", 5));
        l.add(still("z2", 2));

        let stats = l.tick(Tick::new(16, 16), &mut NullSink);
        assert!(stats.full);
        assert_eq!(stats.painted, 3);
        assert_eq!(l.canvas().drawn_images(), vec!["z0", "z2", "z5"]);
    }

    #[test]
    fn set_z_index_reorders() {
        let mut l = layer();
        let a = l.add(still("a", 0));
        l.add(still("b", 1));
        l.set_z_index(a, 2).unwrap();
        assert_eq!(l.get(a).unwrap().node().z(), ZIndex(2));

        l.tick(Tick::new(16, 16), &mut NullSink);
        assert_eq!(l.canvas().drawn_images(), vec!["b", "a"]);
        assert!(l.set_z_index(ElementId::from_raw(99), 0).is_err());
    }

    // ── partial invalidation ──────────────────────────────────────────────

    #[test]
    fn clean_elements_are_not_repainted() {
        let mut l = layer();
        let a = l.add(still("a", 0));
        l.add(still("b", 1).at(100.0, 0.0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        l.get_mut(a).unwrap().node_mut().set_position(30.0, 0.0);
        let stats = l.tick(Tick::new(32, 16), &mut NullSink);

        assert!(!stats.full);
        assert_eq!(stats.painted, 1);
        assert_eq!(stats.erased, 1);
        assert_eq!(
            l.canvas().draws().cloned().collect::<Vec<_>>(),
            vec![
                CanvasCmd::ClearRect(Rect::new(0.0, 0.0, 16.0, 16.0)),
                CanvasCmd::DrawImage {
                    image: "a".to_owned(),
                    src: Rect::new(0.0, 0.0, 16.0, 16.0),
                    dst: Rect::new(30.0, 0.0, 16.0, 16.0),
                },
            ]
        );
    }

    #[test]
    fn clean_element_under_vacated_area_is_redrawn() {
        let mut l = layer();
        l.add(Sprite::still(ImageHandle::new("under", 32, 32), Rect::new(0.0, 0.0, 32.0, 32.0)));
        let top = l.add(still("top", 1).at(8.0, 8.0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        l.get_mut(top).unwrap().node_mut().set_position(100.0, 50.0);
        let stats = l.tick(Tick::new(32, 16), &mut NullSink);

        assert!(!stats.full);
        assert_eq!(stats.painted, 2);
        assert_eq!(l.canvas().drawn_images(), vec!["under", "top"]);
        let draws: Vec<CanvasCmd> = l.canvas().draws().cloned().collect();
        assert_eq!(draws[0], CanvasCmd::ClearRect(Rect::new(8.0, 8.0, 16.0, 16.0)));
        assert!(draws.contains(&CanvasCmd::ClearRect(Rect::new(0.0, 0.0, 32.0, 32.0))));
        assert_eq!(
            draws.last(),
            Some(&CanvasCmd::DrawImage {
                image: "top".to_owned(),
                src: Rect::new(0.0, 0.0, 16.0, 16.0),
                dst: Rect::new(100.0, 50.0, 16.0, 16.0),
            })
        );
    }

    #[test]
    fn element_above_new_position_is_redrawn() {
        let mut l = layer();
        let low = l.add(still("low", 0));
        l.add(still("high", 1).at(60.0, 0.0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        // Moving under "high" would paint over it unless it is drawn again.
        l.get_mut(low).unwrap().node_mut().set_position(56.0, 4.0);
        l.tick(Tick::new(32, 16), &mut NullSink);

        assert_eq!(l.canvas().drawn_images(), vec!["low", "high"]);
    }

    #[test]
    fn edge_touching_neighbours_stay_clean() {
        let mut l = layer();
        let a = l.add(still("a", 0));
        l.add(still("b", 1).at(16.0, 0.0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        l.get_mut(a).unwrap().node_mut().set_position(0.0, 40.0);
        let stats = l.tick(Tick::new(32, 16), &mut NullSink);

        assert_eq!(stats.painted, 1);
        assert_eq!(l.canvas().drawn_images(), vec!["a"]);
    }

    #[test]
    fn rotated_sprite_erases_its_turned_extent() {
        let mut l = layer();
        let mut bar = Sprite::still(ImageHandle::new("bar", 40, 10), Rect::new(0.0, 0.0, 40.0, 10.0)).at(50.0, 50.0);
        bar.set_rotation(std::f32::consts::FRAC_PI_2);
        let id = l.add(bar);
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        l.get_mut(id).unwrap().node_mut().set_position(120.0, 20.0);
        l.tick(Tick::new(32, 16), &mut NullSink);

        let Some(CanvasCmd::ClearRect(r)) = l.canvas().draws().next().cloned() else {
            panic!("expected the old extent to be cleared first");
        };
        assert!(r.origin.x <= 65.0 && r.max().x >= 75.0, "{r:?}");
        assert!(r.origin.y <= 35.0 && r.max().y >= 75.0, "{r:?}");
    }

    #[test]
    fn idle_tick_draws_nothing() {
        let mut l = layer();
        l.add(still("a", 0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        let stats = l.tick(Tick::new(32, 16), &mut NullSink);
        assert_eq!(stats, RenderStats::default());
        assert!(l.canvas().commands().is_empty());
    }

    #[test]
    fn animation_frame_change_marks_dirty() {
        let mut l = layer();
        let seq = FrameSequence::strip(Rect::new(0.0, 0.0, 16.0, 16.0), 2, 100, Playback::Loop).unwrap();
        l.add(Sprite::new(ImageHandle::new("walk", 32, 16), seq));
        l.tick(Tick::new(0, 0), &mut NullSink);
        l.canvas_mut().take();

        assert_eq!(l.tick(Tick::new(50, 50), &mut NullSink).painted, 0);
        assert_eq!(l.tick(Tick::new(100, 50), &mut NullSink).painted, 1);
    }

    #[test]
    fn removed_element_area_is_erased() {
        let mut l = layer();
        let a = l.add(still("a", 0).at(8.0, 8.0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        assert!(l.remove(a).is_ok());
        assert!(l.remove(a).is_err());
        l.tick(Tick::new(32, 16), &mut NullSink);
        assert_eq!(l.canvas().commands(), &[CanvasCmd::ClearRect(Rect::new(8.0, 8.0, 16.0, 16.0))]);
    }

    #[test]
    fn hidden_element_is_erased_not_painted() {
        let mut l = layer();
        let a = l.add(still("a", 0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        l.get_mut(a).unwrap().node_mut().set_visible(false);
        let stats = l.tick(Tick::new(32, 16), &mut NullSink);
        assert_eq!(stats.painted, 0);
        assert_eq!(l.canvas().commands(), &[CanvasCmd::ClearRect(Rect::new(0.0, 0.0, 16.0, 16.0))]);

        // Nothing left to erase on the following tick.
        l.get_mut(a).unwrap().node_mut().mark_dirty();
        l.canvas_mut().take();
        l.tick(Tick::new(48, 16), &mut NullSink);
        assert!(l.canvas().commands().is_empty());
    }

    #[test]
    fn mutation_between_update_and_render_is_still_painted() {
        let mut l = layer();
        let a = l.add(still("a", 0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        let t = Tick::new(32, 16);
        l.update(t, &mut NullSink);
        l.get_mut(a).unwrap().node_mut().set_position(1.0, 1.0);
        l.prerender(t);
        assert_eq!(l.render(t).painted, 1);
        l.postrender(t);
        assert!(!l.get(a).unwrap().is_dirty());
    }

    // ── failure isolation ─────────────────────────────────────────────────

    #[test]
    fn failing_element_does_not_block_others_or_postrender() {
        let mut l = layer();
        l.add(still("below", 0));
        let broken = l.add(Broken { node: Node::new(0.0, 0.0, 4.0, 4.0).with_z(1) });
        l.add(still("above", 2));

        let stats = l.tick(Tick::new(16, 16), &mut NullSink);
        assert_eq!(stats.painted, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(l.canvas().drawn_images(), vec!["below", "above"]);
        assert!(!l.is_fully_dirty());
        assert!(!l.get(broken).unwrap().is_dirty());
    }

    // ── viewport staging ──────────────────────────────────────────────────

    #[test]
    fn last_staged_viewport_wins_and_applies_before_render() {
        let mut l = layer();
        l.add(still("a", 0).at(10.0, 10.0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        l.set_viewport(Viewport::new(-5.0, 0.0));
        l.set_viewport(Viewport::new(20.0, 5.0));
        assert_eq!(l.viewport(), Viewport::default());

        let t = Tick::new(32, 16);
        l.update(t, &mut NullSink);
        l.prerender(t);
        assert_eq!(l.viewport(), Viewport::new(20.0, 5.0));
        assert_eq!(l.pending_viewport(), None);
        l.render(t);
        l.postrender(t);

        let draws: Vec<_> = l.canvas().draws().cloned().collect();
        assert_eq!(
            draws,
            vec![
                CanvasCmd::ClearRect(Rect::new(0.0, 0.0, 200.0, 100.0)),
                CanvasCmd::DrawImage {
                    image: "a".to_owned(),
                    src: Rect::new(0.0, 0.0, 16.0, 16.0),
                    dst: Rect::new(30.0, 15.0, 16.0, 16.0),
                },
            ]
        );
    }

    #[test]
    fn smoothing_change_forces_full_redraw() {
        let mut l = layer();
        l.add(still("a", 0));
        l.tick(Tick::new(16, 16), &mut NullSink);
        l.canvas_mut().take();

        l.set_image_smoothing(false);
        let stats = l.tick(Tick::new(32, 16), &mut NullSink);
        assert!(stats.full);
        assert_eq!(l.canvas().commands()[0], CanvasCmd::ImageSmoothing(false));
    }

    // ── kinds ─────────────────────────────────────────────────────────────

    #[test]
    fn background_layer_refills_erased_regions() {
        let bg = Color::from_rgba8(10, 20, 30, 255);
        let config = LayerConfig::new(64.0, 64.0).with_kind(LayerKind::Background { color: bg });
        let mut l = Layer::new(RecordingCanvas::new(), config).unwrap();
        let b = l.add(Block::new(0.0, 0.0, 8.0, 8.0, Color::white()));

        l.tick(Tick::new(16, 16), &mut NullSink);
        let first = l.canvas_mut().take();
        assert!(first.contains(&CanvasCmd::FillRect(Rect::new(0.0, 0.0, 64.0, 64.0))));

        l.get_mut(b).unwrap().node_mut().set_position(16.0, 0.0);
        l.tick(Tick::new(32, 16), &mut NullSink);
        let cmds = l.canvas().commands();
        assert_eq!(cmds[0], CanvasCmd::ClearRect(Rect::new(0.0, 0.0, 8.0, 8.0)));
        assert_eq!(cmds[1], CanvasCmd::FillStyle(bg));
        assert_eq!(cmds[2], CanvasCmd::FillRect(Rect::new(0.0, 0.0, 8.0, 8.0)));
    }

    // ── queries and events ────────────────────────────────────────────────

    #[test]
    fn elements_at_is_topmost_first() {
        let mut l = layer();
        let low = l.add(still("low", 0));
        let high = l.add(still("high", 3).at(4.0, 4.0));
        l.add(still("far", 9).at(100.0, 0.0));
        assert_eq!(l.elements_at(Vec2::new(6.0, 6.0)), vec![high, low]);
        assert!(l.get_as::<Sprite>(low).is_some());
        assert!(l.get_as::<Block>(low).is_none());
    }

    #[test]
    fn update_forwards_events_with_element_ids() {
        let mut l = layer();
        let seq = FrameSequence::strip(Rect::new(0.0, 0.0, 16.0, 16.0), 2, 100, Playback::Once).unwrap();
        let id = l.add(Sprite::new(ImageHandle::new("slash", 32, 16), seq));
        l.get_mut(id).unwrap().node_mut().motion_mut().set_velocity(Vec2::new(100.0, 0.0));

        let mut events: Vec<SceneEvent> = Vec::new();
        l.tick(Tick::new(100, 100), &mut events);
        assert_eq!(
            events,
            vec![
                SceneEvent::Moved { element: id, from: Vec2::zero(), to: Vec2::new(10.0, 0.0) },
                SceneEvent::AnimationDone { element: id },
            ]
        );
    }
}
