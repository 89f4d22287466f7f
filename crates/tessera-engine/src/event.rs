//! Scene notifications.
//!
//! The engine emits into an explicit [`EventSink`] passed down through update and
//! render. There is no process-wide bus: whoever owns the panel owns the queue,
//! and the queue dies with it.

use crate::coords::Vec2;
use crate::scene::ElementId;

/// Notification emitted by the pipeline for the host's event layer to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// A one-shot animation reached its final frame.
    AnimationDone { element: ElementId },
    /// An element's position changed this tick.
    Moved { element: ElementId, from: Vec2, to: Vec2 },
    /// A moving element came to rest (target reached or motion cancelled).
    Stopped { element: ElementId, at: Vec2 },
    /// Emitted before a layer paints, with the index of the layer in its panel.
    BeforeRender { layer: usize },
    /// Emitted after a layer paints.
    AfterRender { layer: usize },
}

/// Receiver for [`SceneEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: SceneEvent);
}

impl EventSink for Vec<SceneEvent> {
    #[inline]
    fn emit(&mut self, event: SceneEvent) {
        self.push(event);
    }
}

/// Sink that drops everything. Handy for hosts that do not listen.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn emit(&mut self, _event: SceneEvent) {}
}

/// FIFO event buffer for driving a single layer without a panel.
///
/// Nothing is dropped: the buffer keeps every event until [`EventQueue::drain`]
/// is called, so a host that never drains grows it without limit.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SceneEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEvent> {
        self.events.iter()
    }

    /// Removes and returns all queued events in emission order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SceneEvent> {
        self.events.drain(..)
    }
}

impl EventSink for EventQueue {
    #[inline]
    fn emit(&mut self, event: SceneEvent) {
        log::trace!("event: {event:?}");
        self.events.push(event);
    }
}

/// A [`SceneEvent`] tagged with the index of the panel layer that emitted it.
///
/// Element ids are only unique within one layer; the index tells two elements
/// with the same id apart.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEvent {
    pub layer: usize,
    pub event: SceneEvent,
}

impl LayerEvent {
    pub fn new(layer: usize, event: SceneEvent) -> Self {
        Self { layer, event }
    }
}

/// Sink that tags everything it receives with one layer index.
pub(crate) struct LayerScope<'a> {
    layer: usize,
    out: &'a mut Vec<LayerEvent>,
}

impl<'a> LayerScope<'a> {
    pub(crate) fn new(layer: usize, out: &'a mut Vec<LayerEvent>) -> Self {
        Self { layer, out }
    }
}

impl EventSink for LayerScope<'_> {
    fn emit(&mut self, event: SceneEvent) {
        log::trace!("event: layer {} {event:?}", self.layer);
        self.out.push(LayerEvent::new(self.layer, event));
    }
}
