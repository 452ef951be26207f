//! Entity table, peer wiring and the per-tick update.
//!
//! Entities refer to their peer by [`EntityId`], an index into the scene's
//! table, never by pointer. Building is two-phase: spawn every entity, then
//! [`Scene::wire`] pairs. A tick first applies all motion, then
//! [`Scene::realign_all`] snapshots every body before any entity looks at its
//! peer, so no realign sees a half-updated scene.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::clock::TickClock;
use crate::config::SimulationConfig;
use crate::disk::FlatDisk;
use crate::entity::AlignedEntity;
use crate::error::SceneError;
use crate::input::Intents;
use crate::point::HyperbolicPoint;
use crate::render::{Color, Drawable, Renderer};

/// Handle to an entity in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    config: SimulationConfig,
    entities: Vec<AlignedEntity>,
    player: EntityId,
    drone: EntityId,
    background: FlatDisk,
    clock: TickClock,
    ticks: u64,
}

impl Scene {
    /// Two facing figures: the player at the origin, the drone turned and
    /// moved away from it. Both are wired to each other.
    pub fn new(config: SimulationConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let mut scene = Self {
            background: FlatDisk::horizon(config.background_color),
            clock: TickClock::new(config.framerate),
            entities: Vec::with_capacity(2),
            player: EntityId(0),
            drone: EntityId(1),
            ticks: 0,
            config,
        };
        scene.player = scene.spawn(scene.config.player_color)?;
        scene.drone = scene.spawn(scene.config.peer_color)?;
        scene.wire(scene.player, scene.drone)?;

        let (turn, distance) = (scene.config.peer_initial_turn, scene.config.peer_initial_distance);
        let drone = scene.entity_mut(scene.drone)?;
        drone.rotate_right(turn);
        drone.move_forward(distance);

        info!(
            framerate = scene.config.framerate,
            autopilot = scene.config.autopilot,
            "scene ready"
        );
        Ok(scene)
    }

    /// Add an unwired figure at the origin.
    pub fn spawn(&mut self, body_color: Color) -> Result<EntityId, SceneError> {
        let entity = AlignedEntity::from_config(&self.config, body_color)?;
        self.entities.push(entity);
        Ok(EntityId(self.entities.len() - 1))
    }

    /// Make `a` and `b` each other's peer.
    pub fn wire(&mut self, a: EntityId, b: EntityId) -> Result<(), SceneError> {
        if a == b {
            return Err(SceneError::SelfPeer);
        }
        self.entity(b)?;
        self.entity_mut(a)?.set_peer(b);
        self.entity_mut(b)?.set_peer(a);
        debug!(?a, ?b, "wired peers");
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn entities(&self) -> &[AlignedEntity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Result<&AlignedEntity, SceneError> {
        self.entities.get(id.0).ok_or(SceneError::UnknownEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut AlignedEntity, SceneError> {
        self.entities.get_mut(id.0).ok_or(SceneError::UnknownEntity(id))
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn drone(&self) -> EntityId {
        self.drone
    }

    pub fn background(&self) -> &FlatDisk {
        &self.background
    }

    /// Ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One simulation step: player intents, drone autopilot, breathing.
    pub fn tick(&mut self, intents: Intents) -> Result<(), SceneError> {
        let (speed, turn) = (self.config.move_speed, self.config.rotate_speed);
        let player = self.entity_mut(self.player)?;
        if intents.move_forward {
            player.move_forward(speed);
            player.append_trail_point();
        }
        if intents.rotate_right {
            player.rotate_right(turn);
        }
        if intents.rotate_left {
            player.rotate_left(turn);
        }
        if intents.move_backward {
            player.move_backward(speed);
            player.append_trail_point();
        }
        if !intents.is_idle() {
            trace!(?intents, "player intents applied");
        }

        if self.config.autopilot {
            let drone = self.entity_mut(self.drone)?;
            drone.rotate_right(turn);
            drone.move_forward(speed);
            drone.append_trail_point();
        }

        for entity in &mut self.entities {
            entity.breathe()?;
        }
        self.ticks += 1;
        Ok(())
    }

    /// Run every tick that is due at `now_millis` and return how many ran.
    pub fn update(&mut self, now_millis: u64, intents: Intents) -> Result<u64, SceneError> {
        let due = self.clock.due(now_millis);
        for _ in 0..due {
            self.tick(intents)?;
        }
        if due > 0 {
            debug!(due, total = self.ticks, "simulated ticks");
        }
        Ok(due)
    }

    /// Realign every entity against a snapshot of all bodies.
    pub fn realign_all(&mut self) -> Result<(), SceneError> {
        let bodies: Vec<HyperbolicPoint> = self.entities.iter().map(|e| *e.body().center()).collect();
        for (index, entity) in self.entities.iter_mut().enumerate() {
            let peer = entity.peer().ok_or(SceneError::UnwiredPeer(EntityId(index)))?;
            let target = bodies.get(peer.0).ok_or(SceneError::UnknownEntity(peer))?;
            entity.realign(target)?;
        }
        Ok(())
    }

    /// Realign, then draw the whole scene.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> Result<(), SceneError> {
        self.realign_all()?;
        self.draw(renderer);
        Ok(())
    }
}

impl Drawable for Scene {
    fn draw(&self, renderer: &mut dyn Renderer) {
        self.background.draw(renderer);
        for entity in &self.entities {
            entity.draw(renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Intent;
    use crate::render::FrameRecorder;

    fn still_scene() -> Scene {
        let config = SimulationConfig {
            autopilot: false,
            ..SimulationConfig::default()
        };
        Scene::new(config).unwrap()
    }

    #[test]
    fn test_new_wires_both_ways() {
        let scene = Scene::new(SimulationConfig::default()).unwrap();
        let (p, d) = (scene.player(), scene.drone());
        assert_eq!(scene.entity(p).unwrap().peer(), Some(d));
        assert_eq!(scene.entity(d).unwrap().peer(), Some(p));
    }

    #[test]
    fn test_drone_starts_east_of_player() {
        let scene = still_scene();
        let [x, y] = scene.entity(scene.drone()).unwrap().body().center().to_plane();
        assert!((x - 0.5f64.tanh()).abs() < 1e-9 && y.abs() < 1e-9, "drone at ({}, {})", x, y);
    }

    #[test]
    fn test_wire_rejects_self_and_unknown() {
        let mut scene = still_scene();
        let p = scene.player();
        assert!(matches!(scene.wire(p, p), Err(SceneError::SelfPeer)));
        assert!(matches!(
            scene.wire(p, EntityId(7)),
            Err(SceneError::UnknownEntity(_))
        ));
        assert_eq!(scene.entity(p).unwrap().peer(), Some(scene.drone()), "failed wiring must not rewire");
    }

    #[test]
    fn test_unwired_entity_blocks_realign() {
        let mut scene = still_scene();
        let lonely = scene.spawn(Color::BLUE).unwrap();
        assert!(matches!(
            scene.realign_all(),
            Err(SceneError::UnwiredPeer(id)) if id == lonely
        ));
    }

    #[test]
    fn test_forward_tick_moves_and_leaves_trail() {
        let mut scene = still_scene();
        scene.tick(Intents::none().with(Intent::MoveForward)).unwrap();
        let player = scene.entity(scene.player()).unwrap();
        assert_eq!(player.trail().len(), 1);
        let y = player.body().center().to_plane()[1];
        assert!((y - 0.01f64.tanh()).abs() < 1e-9);
        assert_eq!(scene.ticks(), 1);
    }

    #[test]
    fn test_rotation_alone_leaves_no_trail() {
        let mut scene = still_scene();
        scene.tick(Intents::none().with(Intent::RotateLeft)).unwrap();
        assert!(scene.entity(scene.player()).unwrap().trail().is_empty());
    }

    #[test]
    fn test_autopilot_drone_circles() {
        let mut scene = Scene::new(SimulationConfig::default()).unwrap();
        let start = *scene.entity(scene.drone()).unwrap().body().center();
        for _ in 0..50 {
            scene.tick(Intents::none()).unwrap();
        }
        let drone = scene.entity(scene.drone()).unwrap();
        assert_eq!(drone.trail().len(), 50);
        assert!(drone.body().center().distance(&start) > 0.1);
        assert!(scene.entity(scene.player()).unwrap().trail().is_empty());
    }

    #[test]
    fn test_update_runs_due_ticks() {
        let mut scene = still_scene();
        assert_eq!(scene.update(100, Intents::none()).unwrap(), 6);
        assert_eq!(scene.ticks(), 6);
        assert_eq!(scene.update(105, Intents::none()).unwrap(), 0);
    }

    #[test]
    fn test_frame_draws_everything_in_view() {
        let mut scene = Scene::new(SimulationConfig::default()).unwrap();
        for _ in 0..10 {
            scene.tick(Intents::none()).unwrap();
        }
        let mut recorder = FrameRecorder::new();
        scene.frame(&mut recorder).unwrap();
        // background + drone trail + 2 × (body, mouth, 4 eyes)
        assert_eq!(recorder.calls().len(), 1 + 1 + 12);
        assert!(recorder.all_in_view());
    }
}
