use std::collections::HashMap;

use tessera_engine::ConfigError;
use tessera_engine::scene::{Element, Node, Sprite, UpdateCtx, ZIndex};
use tessera_engine::surface::DynSurface;
use tessera_engine::time::Tick;

use crate::{Action, Direction};

/// One sprite per action × direction, shown as a single actor.
///
/// Exactly one sprite is active (visible) at any time. The actor's own [`Node`]
/// is authoritative for position, scale, opacity and layer bookkeeping; the active
/// sprite is synced from it before it updates or paints, so switching state never
/// moves the actor.
#[derive(Debug, Clone)]
pub struct ActionSet {
    node: Node,
    sprites: HashMap<(Action, Direction), Sprite>,
    active: (Action, Direction),
}

/// Collects the sprites of an [`ActionSet`].
#[derive(Debug, Default)]
pub struct ActionSetBuilder {
    sprites: HashMap<(Action, Direction), Sprite>,
}

impl ActionSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the sprite for `(action, direction)`, replacing any previous one.
    pub fn insert(mut self, action: Action, direction: Direction, sprite: Sprite) -> Self {
        self.sprites.insert((action, direction), sprite);
        self
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Builds the set in its initial state, `stand` facing `south`.
    pub fn build(mut self) -> Result<ActionSet, ConfigError> {
        let initial = (Action::default(), Direction::default());
        let Some(first) = self.sprites.get(&initial) else {
            return Err(ConfigError::MissingInitialState {
                action: initial.0.to_string(),
                direction: initial.1.to_string(),
            });
        };

        let b = first.node().bounds();
        let node = Node::new(b.origin.x, b.origin.y, b.size.x, b.size.y);

        for (key, sprite) in &mut self.sprites {
            sprite.node_mut().set_visible(*key == initial);
        }

        Ok(ActionSet { node, sprites: self.sprites, active: initial })
    }
}

impl ActionSet {
    pub fn builder() -> ActionSetBuilder {
        ActionSetBuilder::new()
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.move_to(x, y);
        self
    }

    pub fn with_z(mut self, z: impl Into<ZIndex>) -> Self {
        self.node = self.node.with_z(z);
        self
    }

    /// Currently active `(action, direction)`.
    #[inline]
    pub fn active(&self) -> (Action, Direction) {
        self.active
    }

    #[inline]
    pub fn action(&self) -> Action {
        self.active.0
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.active.1
    }

    pub fn contains(&self, action: Action, direction: Direction) -> bool {
        self.sprites.contains_key(&(action, direction))
    }

    pub fn element(&self, action: Action, direction: Direction) -> Option<&Sprite> {
        self.sprites.get(&(action, direction))
    }

    pub fn element_mut(&mut self, action: Action, direction: Direction) -> Option<&mut Sprite> {
        self.sprites.get_mut(&(action, direction))
    }

    pub fn active_sprite(&self) -> Option<&Sprite> {
        self.sprites.get(&self.active)
    }

    /// Switches to `(action, direction)`; `None` keeps the current direction.
    ///
    /// Returns `Ok(false)` when that pair is already active. The target takes the
    /// current actor position, is shown, and restarts its animation; the previous
    /// sprite is hidden.
    pub fn activate(&mut self, action: Action, direction: Option<Direction>) -> Result<bool, ConfigError> {
        let target = (action, direction.unwrap_or(self.active.1));
        if target == self.active {
            return Ok(false);
        }
        if !self.sprites.contains_key(&target) {
            return Err(ConfigError::UnknownState {
                action: target.0.to_string(),
                direction: target.1.to_string(),
            });
        }

        let previous = std::mem::replace(&mut self.active, target);
        self.sync_active();
        if let Some(next) = self.sprites.get_mut(&target) {
            next.node_mut().set_visible(true);
            next.restart();
            let size = next.node().size();
            self.node.set_size(size.x, size.y);
        }
        if let Some(prev) = self.sprites.get_mut(&previous) {
            prev.node_mut().set_visible(false);
        }
        self.node.mark_dirty();

        log::debug!("lpc: {}/{} -> {}/{}", previous.0, previous.1, target.0, target.1);
        Ok(true)
    }

    /// Re-activates the current action facing `direction`.
    pub fn set_direction(&mut self, direction: Direction) -> Result<bool, ConfigError> {
        self.activate(self.active.0, Some(direction))
    }

    /// Moves the actor, and with it the active sprite.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.node.set_position(x, y);
        self.sync_active();
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        let p = self.node.position();
        self.move_to(p.x + dx, p.y + dy);
    }

    /// Copies actor placement onto the active sprite.
    fn sync_active(&mut self) {
        let (pos, scale, opacity) = (self.node.position(), self.node.scale(), self.node.opacity());
        if let Some(sprite) = self.sprites.get_mut(&self.active) {
            let n = sprite.node_mut();
            n.set_position(pos.x, pos.y);
            n.set_scale(scale.x, scale.y);
            n.set_opacity(opacity);
        }
    }
}

impl Element for ActionSet {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> bool {
        self.sync_active();
        // The sprite emits with the actor's id, so "animation done" reaches the
        // host as coming from this element.
        match self.sprites.get_mut(&self.active) {
            Some(sprite) => sprite.update(ctx),
            None => false,
        }
    }

    fn render(&mut self, surface: &mut DynSurface, tick: Tick) -> anyhow::Result<()> {
        self.sync_active();
        let Some(sprite) = self.sprites.get_mut(&self.active) else {
            anyhow::bail!("active state {}/{} has no sprite", self.active.0, self.active.1);
        };
        sprite.render(surface, tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_engine::anim::{FrameSequence, Playback};
    use tessera_engine::assets::ImageHandle;
    use tessera_engine::coords::{Rect, Vec2};
    use tessera_engine::event::{NullSink, SceneEvent};
    use tessera_engine::layer::{Layer, LayerConfig};
    use tessera_engine::scene::ElementId;
    use tessera_engine::surface::RecordingCanvas;

    fn sheet() -> ImageHandle {
        ImageHandle::new("hero", 256, 256)
    }

    fn strip(row: f32, frames: usize, playback: Playback) -> Sprite {
        let seq = FrameSequence::strip(Rect::new(0.0, row * 32.0, 32.0, 32.0), frames, 100, playback).unwrap();
        Sprite::new(sheet(), seq)
    }

    fn hero() -> ActionSet {
        ActionSet::builder()
            .insert(Action::Stand, Direction::South, strip(0.0, 1, Playback::Loop))
            .insert(Action::Stand, Direction::North, strip(1.0, 1, Playback::Loop))
            .insert(Action::Walk, Direction::South, strip(2.0, 4, Playback::Loop))
            .insert(Action::Walk, Direction::East, strip(3.0, 4, Playback::Loop))
            .insert(Action::Slash, Direction::South, strip(4.0, 3, Playback::Once))
            .build()
            .unwrap()
    }

    fn visible(set: &ActionSet) -> Vec<(Action, Direction)> {
        set.sprites
            .iter()
            .filter(|(_, s)| s.node().is_visible())
            .map(|(k, _)| *k)
            .collect()
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn starts_standing_south_with_only_that_sprite_visible() {
        let set = hero();
        assert_eq!(set.active(), (Action::Stand, Direction::South));
        assert_eq!(visible(&set), vec![(Action::Stand, Direction::South)]);
    }

    #[test]
    fn build_requires_the_initial_state() {
        let err = ActionSet::builder()
            .insert(Action::Walk, Direction::South, strip(0.0, 2, Playback::Loop))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingInitialState { action: "stand".to_owned(), direction: "south".to_owned() }
        );
    }

    // ── activation ────────────────────────────────────────────────────────

    #[test]
    fn reactivating_the_active_pair_changes_nothing() {
        let mut set = hero().at(40.0, 50.0);
        set.node_mut().clear_dirty();

        assert!(!set.activate(Action::Stand, None).unwrap());
        assert!(!set.activate(Action::Stand, Some(Direction::South)).unwrap());
        assert!(!set.node().is_dirty());
        assert_eq!(visible(&set), vec![(Action::Stand, Direction::South)]);
        assert_eq!(set.active_sprite().unwrap().node().position(), Vec2::new(40.0, 50.0));
    }

    #[test]
    fn activation_keeps_world_position() {
        let mut set = hero().at(120.0, 80.0);
        let before = set.element(Action::Stand, Direction::South).unwrap().node().position();

        assert!(set.activate(Action::Walk, None).unwrap());
        assert_eq!(set.active(), (Action::Walk, Direction::South));
        let after = set.element(Action::Walk, Direction::South).unwrap().node().position();
        assert_eq!(before, after);
        assert_eq!(set.node().position(), before);
    }

    #[test]
    fn exactly_one_sprite_visible_after_any_switch() {
        let mut set = hero();
        set.activate(Action::Walk, Some(Direction::East)).unwrap();
        assert_eq!(visible(&set), vec![(Action::Walk, Direction::East)]);

        set.set_direction(Direction::South).unwrap();
        assert_eq!(visible(&set), vec![(Action::Walk, Direction::South)]);

        // A failed switch leaves the state alone.
        assert!(set.set_direction(Direction::West).is_err());
        assert_eq!(visible(&set), vec![(Action::Walk, Direction::South)]);
        assert_eq!(set.active(), (Action::Walk, Direction::South));
    }

    #[test]
    fn unknown_pair_is_a_config_error() {
        let mut set = hero();
        assert_eq!(
            set.activate(Action::Hurt, Some(Direction::West)).unwrap_err(),
            ConfigError::UnknownState { action: "hurt".to_owned(), direction: "west".to_owned() }
        );
    }

    #[test]
    fn activation_restarts_the_target_animation() {
        let mut set = hero();
        set.activate(Action::Walk, None).unwrap();
        let mut sink = NullSink;
        set.update(&mut UpdateCtx::new(Tick::new(250, 250), ElementId::from_raw(1), &mut sink));
        assert_eq!(set.active_sprite().unwrap().frames().index(), 2);

        set.activate(Action::Stand, None).unwrap();
        set.activate(Action::Walk, None).unwrap();
        assert_eq!(set.active_sprite().unwrap().frames().index(), 0);
    }

    // ── element behavior ──────────────────────────────────────────────────

    #[test]
    fn moving_moves_the_active_sprite() {
        let mut set = hero().at(10.0, 10.0);
        set.move_by(5.0, -2.0);
        assert_eq!(set.active_sprite().unwrap().node().position(), Vec2::new(15.0, 8.0));
    }

    #[test]
    fn forwards_animation_done_under_the_actor_id() {
        let mut set = hero();
        set.activate(Action::Slash, None).unwrap();
        let id = ElementId::from_raw(9);
        let mut events: Vec<SceneEvent> = Vec::new();
        assert!(set.update(&mut UpdateCtx::new(Tick::new(200, 200), id, &mut events)));
        assert_eq!(events, vec![SceneEvent::AnimationDone { element: id }]);
    }

    #[test]
    fn layer_paints_only_the_active_sprite() {
        let mut layer = Layer::new(RecordingCanvas::new(), LayerConfig::new(320.0, 240.0)).unwrap();
        let id = layer.add(hero().at(32.0, 0.0));
        layer.tick(Tick::new(0, 0), &mut NullSink);
        assert_eq!(layer.canvas().drawn_images(), vec!["hero"]);

        layer.canvas_mut().take();
        layer.get_mut_as::<ActionSet>(id).unwrap().activate(Action::Walk, Some(Direction::East)).unwrap();
        let stats = layer.tick(Tick::new(16, 16), &mut NullSink);
        assert_eq!(stats.painted, 1);
        assert_eq!(stats.erased, 1);
        assert!(layer.canvas().commands().iter().any(|c| matches!(
            c,
            tessera_engine::surface::CanvasCmd::DrawImage { src, dst, .. }
                if *src == Rect::new(0.0, 96.0, 32.0, 32.0) && *dst == Rect::new(32.0, 0.0, 32.0, 32.0)
        )));
    }
}
