//! Ordered stack of layers driven by one clock.

use crate::error::ConfigError;
use crate::event::{EventSink, LayerEvent, LayerScope, SceneEvent};
use crate::layer::{Layer, RenderStats};
use crate::surface::Canvas;
use crate::time::Tick;

/// Named layers composited back-to-front in insertion order, plus the event
/// queue their elements emit into.
///
/// Queued events are tagged with the emitting layer's index and kept until the
/// host calls [`Panel::drain_events`]; the queue has no cap of its own.
pub struct Panel<C: Canvas + 'static> {
    layers: Vec<(String, Layer<C>)>,
    events: Vec<LayerEvent>,
}

impl<C: Canvas + 'static> Panel<C> {
    pub fn new() -> Self {
        Self { layers: Vec::new(), events: Vec::new() }
    }

    /// Appends a layer above the existing ones and returns its index.
    ///
    /// Replaces (in place) a layer already registered under `name`.
    pub fn add_layer(&mut self, name: impl Into<String>, layer: Layer<C>) -> usize {
        let name = name.into();
        if let Some(idx) = self.index_of(&name) {
            log::debug!("panel: replacing layer '{name}'");
            self.layers[idx].1 = layer;
            return idx;
        }
        log::debug!("panel: added layer '{name}' at {}", self.layers.len());
        self.layers.push((name, layer));
        self.layers.len() - 1
    }

    pub fn remove_layer(&mut self, name: &str) -> Result<Layer<C>, ConfigError> {
        let idx = self.index_of(name).ok_or_else(|| ConfigError::UnknownKey {
            kind: "layer",
            name: name.to_owned(),
        })?;
        Ok(self.layers.remove(idx).1)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|(n, _)| n == name)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer<C>> {
        self.layers.iter().find(|(n, _)| n == name).map(|(_, l)| l)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer<C>> {
        self.layers.iter_mut().find(|(n, _)| n == name).map(|(_, l)| l)
    }

    /// Layer names, bottom to top.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(n, _)| n.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Runs one frame.
    ///
    /// Every layer is updated first so cross-layer state settles before anything
    /// paints. Then each layer, bottom to top, goes through prerender, render and
    /// postrender, bracketed by `BeforeRender`/`AfterRender` notifications.
    pub fn tick(&mut self, tick: Tick) -> Vec<RenderStats> {
        for (idx, (_, layer)) in self.layers.iter_mut().enumerate() {
            layer.update(tick, &mut LayerScope::new(idx, &mut self.events));
        }

        let mut stats = Vec::with_capacity(self.layers.len());
        for (idx, (name, layer)) in self.layers.iter_mut().enumerate() {
            let mut scope = LayerScope::new(idx, &mut self.events);
            scope.emit(SceneEvent::BeforeRender { layer: idx });
            layer.prerender(tick);
            let s = layer.render(tick);
            layer.postrender(tick);
            scope.emit(SceneEvent::AfterRender { layer: idx });

            if s.failed > 0 {
                log::debug!("panel: layer '{name}' had {} failed element(s)", s.failed);
            }
            stats.push(s);
        }
        stats
    }

    /// Events queued since the last drain, oldest first.
    #[inline]
    pub fn events(&self) -> &[LayerEvent] {
        &self.events
    }

    /// Takes every event queued since the last drain, in emission order.
    ///
    /// Hosts should call this once per tick; undrained events are never dropped.
    pub fn drain_events(&mut self) -> Vec<LayerEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<C: Canvas + 'static> Default for Panel<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageHandle;
    use crate::coords::{Rect, Vec2};
    use crate::layer::LayerConfig;
    use crate::scene::Sprite;
    use crate::surface::RecordingCanvas;

    fn layer() -> Layer<RecordingCanvas> {
        Layer::new(RecordingCanvas::new(), LayerConfig::new(100.0, 100.0)).unwrap()
    }

    fn dot(id: &str) -> Sprite {
        Sprite::still(ImageHandle::new(id, 8, 8), Rect::new(0.0, 0.0, 8.0, 8.0))
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn brackets_each_layer_render_in_order() {
        let mut panel = Panel::new();
        assert_eq!(panel.add_layer("bg", layer()), 0);
        assert_eq!(panel.add_layer("fg", layer()), 1);

        let stats = panel.tick(Tick::new(16, 16));
        assert_eq!(stats.len(), 2);
        assert_eq!(
            panel.drain_events(),
            vec![
                LayerEvent::new(0, SceneEvent::BeforeRender { layer: 0 }),
                LayerEvent::new(0, SceneEvent::AfterRender { layer: 0 }),
                LayerEvent::new(1, SceneEvent::BeforeRender { layer: 1 }),
                LayerEvent::new(1, SceneEvent::AfterRender { layer: 1 }),
            ]
        );
        assert!(panel.events().is_empty());
    }

    #[test]
    fn element_events_precede_render_brackets() {
        let mut panel = Panel::new();
        panel.add_layer("gfx", layer());
        let id = panel.layer_mut("gfx").unwrap().add(dot("a"));
        let moving = panel.layer_mut("gfx").unwrap().get_mut(id).unwrap();
        moving.node_mut().motion_mut().move_towards(Vec2::new(4.0, 0.0), 1_000.0);

        panel.tick(Tick::new(16, 16));
        let events = panel.drain_events();
        assert!(matches!(events[0].event, SceneEvent::Moved { element, .. } if element == id));
        assert!(matches!(events[1].event, SceneEvent::Stopped { element, .. } if element == id));
        assert_eq!(events[2], LayerEvent::new(0, SceneEvent::BeforeRender { layer: 0 }));
    }

    #[test]
    fn same_element_id_in_two_layers_is_told_apart() {
        let mut panel = Panel::new();
        panel.add_layer("ground", layer());
        panel.add_layer("actors", layer());

        let mut ids = Vec::new();
        for name in ["ground", "actors"] {
            let l = panel.layer_mut(name).unwrap();
            let id = l.add(dot(name));
            l.get_mut(id).unwrap().node_mut().motion_mut().move_towards(Vec2::new(4.0, 0.0), 1_000.0);
            ids.push(id);
        }
        assert_eq!(ids[0], ids[1]);

        panel.tick(Tick::new(16, 16));
        let stops: Vec<usize> = panel
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e.event, SceneEvent::Stopped { .. }))
            .map(|e| e.layer)
            .collect();
        assert_eq!(stops, vec![0, 1]);
    }

    #[test]
    fn events_accumulate_until_drained() {
        let mut panel = Panel::new();
        panel.add_layer("gfx", layer());

        for n in 1..=3u64 {
            panel.tick(Tick::new(n * 16, 16));
        }
        assert_eq!(panel.events().len(), 6);
        assert_eq!(panel.drain_events().len(), 6);
        assert!(panel.events().is_empty());
        assert!(panel.drain_events().is_empty());
    }

    #[test]
    fn replacing_and_removing_layers() {
        let mut panel = Panel::new();
        panel.add_layer("a", layer());
        panel.add_layer("b", layer());
        assert_eq!(panel.add_layer("a", layer()), 0);
        assert_eq!(panel.layer_names().collect::<Vec<_>>(), vec!["a", "b"]);

        assert!(panel.remove_layer("a").is_ok());
        assert!(panel.remove_layer("a").is_err());
        assert!(panel.layer("b").is_some());
        assert_eq!(panel.len(), 1);
    }
}
