// systems/animation.rs
//
// Object animation system — drives PlaybackStatus per animation and applies
// frame shifts to scene entities by EntityId.
//
// Usage:
//   let mut anims = AnimationState::new();
//   anims.add(entity_id, endpoints, PlaybackConfig::new(500.0).looping());
//   anims.tick(dt_ms, &mut scene);  // once per render tick

use std::collections::HashMap;
use crate::api::types::{AnimationId, EntityId};
use crate::components::entity::Entity;
use crate::components::playback::{PlaybackConfig, PlaybackStatus};
use crate::core::scene::Scene;
use crate::extensions::frame_shift::{calculate_frame_shift, AnimationEndpoints, FrameShift};

/// One registered object animation.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Entity whose transform is animated.
    pub target: EntityId,
    pub endpoints: AnimationEndpoints,
    pub status: PlaybackStatus,
    reported_missing: bool,
}

impl Animation {
    fn apply(&self, entity: &mut Entity, shift: &FrameShift) {
        entity.pos += shift.position;
        entity.rotation += shift.rotation;
        entity.scale += shift.scale;
    }

    /// Snap the entity back to the start transform.
    fn teleport(&self, entity: &mut Entity) {
        entity.pos = self.endpoints.start_pos;
        entity.rotation = self.endpoints.start_rotation;
        entity.scale = self.endpoints.start_scale;
    }
}

/// Manages all registered object animations.
#[derive(Debug, Default)]
pub struct AnimationState {
    animations: HashMap<AnimationId, Animation>,
    next_id: u32,
    /// Animations that stopped on their own during the latest tick.
    completed: Vec<AnimationId>,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation for an entity and start it playing.
    pub fn add(&mut self, entity: EntityId, endpoints: AnimationEndpoints, config: PlaybackConfig) -> AnimationId {
        let id = self.add_stopped(entity, endpoints, config);
        if let Some(anim) = self.animations.get_mut(&id) {
            anim.status.force_start();
        }
        id
    }

    /// Register an animation without starting it.
    pub fn add_stopped(&mut self, entity: EntityId, endpoints: AnimationEndpoints, config: PlaybackConfig) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.animations.insert(id, Animation {
            target: entity,
            endpoints,
            status: PlaybackStatus::new(id, config),
            reported_missing: false,
        });
        id
    }

    /// Remove an animation by handle.
    pub fn remove(&mut self, id: AnimationId) -> bool {
        self.animations.remove(&id).is_some()
    }

    /// Remove all animations for an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.animations.retain(|_, a| a.target != entity);
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(&id)
    }

    /// Playback status for explicit control (pause, reverse, restart…).
    pub fn status_mut(&mut self, id: AnimationId) -> Option<&mut PlaybackStatus> {
        self.animations.get_mut(&id).map(|a| &mut a.status)
    }

    /// Pause every running animation.
    pub fn pause_all(&mut self) {
        for anim in self.animations.values_mut() {
            if anim.status.is_running() {
                anim.status.toggle_pause();
            }
        }
    }

    /// Resume every paused animation.
    pub fn resume_all(&mut self) {
        for anim in self.animations.values_mut() {
            if anim.status.is_paused() {
                anim.status.toggle_pause();
            }
        }
    }

    /// Advance every animation by `dt_ms` and apply the frame shifts.
    /// Returns the number of animations that stopped this tick; their
    /// handles replace the previous tick's in [`AnimationState::completed`].
    pub fn tick(&mut self, dt_ms: f64, scene: &mut Scene) -> usize {
        self.completed.clear();

        for (&id, anim) in self.animations.iter_mut() {
            if !anim.status.is_running() {
                continue;
            }

            let Some(entity) = scene.get_mut(anim.target) else {
                if !anim.reported_missing {
                    log::warn!("animation {:?}: entity {:?} not in scene, skipping", id, anim.target);
                    anim.reported_missing = true;
                }
                continue;
            };
            anim.reported_missing = false;
            if !entity.active {
                continue;
            }

            let shift = calculate_frame_shift(dt_ms, &anim.endpoints, &anim.status);
            anim.apply(entity, &shift);

            anim.status.advance(dt_ms);

            if anim.status.is_primed_for_teleport() {
                anim.teleport(entity);
                anim.status.toggle_primed_for_teleport();
            }
            if anim.status.is_stopped() {
                self.completed.push(id);
            }
        }

        self.completed.len()
    }

    /// Animations that stopped on their own during the latest tick.
    pub fn completed(&self) -> &[AnimationId] {
        &self.completed
    }

    /// Drain handles of animations that stopped during the latest tick.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = AnimationId> + '_ {
        self.completed.drain(..)
    }

    /// Number of registered animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Clear all animations.
    pub fn clear(&mut self) {
        self.animations.clear();
        self.completed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn slide() -> AnimationEndpoints {
        AnimationEndpoints::fixed_at(Vec3::ZERO).with_position(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0))
    }

    fn scene_with(id: EntityId) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(id));
        scene
    }

    #[test]
    fn slides_and_completes() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut anims = AnimationState::new();
        let anim = anims.add(id, slide(), PlaybackConfig::new(1000.0));

        anims.tick(500.0, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 50.0).abs() < 0.01);

        anims.tick(500.0, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 100.0).abs() < 0.01);
        assert!(anims.get(anim).unwrap().status.is_playing());

        assert_eq!(anims.tick(1.0, &mut scene), 1);
        assert_eq!(anims.drain_completed().collect::<Vec<_>>(), vec![anim]);
        assert!(anims.get(anim).unwrap().status.is_stopped());
    }

    #[test]
    fn completions_only_cover_latest_tick() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut anims = AnimationState::new();
        let short = anims.add(id, slide(), PlaybackConfig::new(100.0));
        let long = anims.add(id, slide(), PlaybackConfig::new(300.0));

        assert_eq!(anims.tick(150.0, &mut scene), 1);
        assert_eq!(anims.completed(), &[short]);

        assert_eq!(anims.tick(200.0, &mut scene), 1);
        assert_eq!(anims.completed(), &[long]);

        assert_eq!(anims.tick(200.0, &mut scene), 0);
        assert!(anims.completed().is_empty());
    }

    #[test]
    fn teleport_snaps_back_to_start() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut anims = AnimationState::new();
        let anim = anims.add(id, slide(), PlaybackConfig::new(1000.0).looping().teleporting());

        anims.tick(600.0, &mut scene);
        anims.tick(600.0, &mut scene);
        assert_eq!(scene.get(id).unwrap().pos, Vec3::ZERO);
        let status = &anims.get(anim).unwrap().status;
        assert!(!status.is_primed_for_teleport());
        assert!((status.elapsed_ms() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn ping_pong_returns_home() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut anims = AnimationState::new();
        anims.add(id, slide(), PlaybackConfig::new(1000.0).ping_pong());

        for _ in 0..4 {
            anims.tick(250.0, &mut scene);
        }
        // the boundary frame does not end the cycle yet
        anims.tick(0.5, &mut scene);
        let peak = scene.get(id).unwrap().pos.x;
        assert!((peak - 100.05).abs() < 0.01);

        for _ in 0..4 {
            anims.tick(250.0, &mut scene);
        }
        assert!(scene.get(id).unwrap().pos.x.abs() < 0.1);
    }

    #[test]
    fn paused_animation_holds() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut anims = AnimationState::new();
        let anim = anims.add(id, slide(), PlaybackConfig::new(1000.0));

        anims.pause_all();
        anims.tick(500.0, &mut scene);
        assert_eq!(scene.get(id).unwrap().pos.x, 0.0);
        assert!(anims.status_mut(anim).unwrap().is_paused());

        anims.resume_all();
        anims.tick(500.0, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 50.0).abs() < 0.01);
    }

    #[test]
    fn missing_entity_is_skipped() {
        let mut scene = scene_with(EntityId(1));
        let mut anims = AnimationState::new();
        let orphan = anims.add(EntityId(99), slide(), PlaybackConfig::new(1000.0));
        anims.add(EntityId(1), slide(), PlaybackConfig::new(1000.0));

        anims.tick(100.0, &mut scene);
        assert!((scene.get(EntityId(1)).unwrap().pos.x - 10.0).abs() < 0.01);
        assert_eq!(anims.get(orphan).unwrap().status.elapsed_ms(), 0.0);
    }

    #[test]
    fn stopped_until_started() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut anims = AnimationState::new();
        let anim = anims.add_stopped(id, slide(), PlaybackConfig::new(1000.0));

        anims.tick(100.0, &mut scene);
        assert_eq!(scene.get(id).unwrap().pos.x, 0.0);

        anims.status_mut(anim).unwrap().force_start();
        anims.tick(100.0, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 10.0).abs() < 0.01);
    }

    #[test]
    fn remove_entity_animations() {
        let mut anims = AnimationState::new();
        let id = EntityId(1);
        anims.add(id, slide(), PlaybackConfig::new(1000.0));
        anims.add(id, slide(), PlaybackConfig::new(500.0));
        assert_eq!(anims.len(), 2);
        anims.remove_entity(id);
        assert!(anims.is_empty());
    }
}
