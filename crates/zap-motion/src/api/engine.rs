use glam::Vec3;
use crate::api::types::{AnimationId, EntityId, LightId};
use crate::assets::presets::PresetLibrary;
use crate::components::entity::Entity;
use crate::components::light::{LightHandle, PointLight};
use crate::components::playback::PlaybackConfig;
use crate::core::scene::Scene;
use crate::core::time::{FrameClock, MonotonicTime, TimeSource, FRAME_WRAP_CEILING};
use crate::extensions::frame_shift::AnimationEndpoints;
use crate::systems::animation::AnimationState;
use crate::systems::lighting::{LightMotionUpdater, LightState};
use crate::systems::oscillation::OscillatorMode;

/// Engine configuration, provided by the host.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// Tick count at which the frame counter wraps (default: 1_000_000_000).
    pub frame_wrap_ceiling: u64,
    /// Longest delta in seconds a single tick may apply (default: 0.25).
    pub max_frame_delta: f64,
    /// How intensity and hue oscillate (default: analytic).
    pub oscillator: OscillatorMode,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            frame_wrap_ceiling: FRAME_WRAP_CEILING,
            max_frame_delta: 0.25,
            oscillator: OscillatorMode::default(),
        }
    }
}

/// Summary of one engine tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    /// Wall-clock seconds of this tick.
    pub seconds: f64,
    /// Clamped seconds since the previous tick.
    pub delta: f64,
    /// Object animations that stopped during this tick.
    pub completed: usize,
}

/// Owns both animation paths and drives them once per render tick.
pub struct MotionEngine<T: TimeSource = MonotonicTime> {
    pub scene: Scene,
    pub animations: AnimationState,
    pub lights: LightState<PointLight>,
    pub presets: PresetLibrary,
    updater: LightMotionUpdater<T>,
    next_id: u32,
}

impl MotionEngine<MonotonicTime> {
    /// Engine on the process monotonic clock with built-in presets.
    pub fn with_defaults() -> Self {
        Self::new(MotionConfig::default(), MonotonicTime::new())
    }
}

impl<T: TimeSource> MotionEngine<T> {
    pub fn new(config: MotionConfig, time: T) -> Self {
        let clock = FrameClock::with_ceiling(config.frame_wrap_ceiling)
            .with_max_delta(config.max_frame_delta);
        Self {
            scene: Scene::new(),
            animations: AnimationState::new(),
            lights: LightState::new(),
            presets: PresetLibrary::builtin(),
            updater: LightMotionUpdater::with_clock(time, clock, config.oscillator),
            next_id: 1,
        }
    }

    /// Replace the preset library (e.g. one loaded from a manifest).
    pub fn with_presets(mut self, presets: PresetLibrary) -> Self {
        self.presets = presets;
        self
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity at `pos`. Returns its ID.
    pub fn spawn(&mut self, pos: Vec3) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(Entity::new(id).with_pos(pos));
        id
    }

    /// Despawn an entity and drop its animations.
    pub fn despawn(&mut self, id: EntityId) {
        self.animations.remove_entity(id);
        self.scene.despawn(id);
    }

    /// Register and start an animation on an entity.
    pub fn animate(&mut self, entity: EntityId, endpoints: AnimationEndpoints, config: PlaybackConfig) -> AnimationId {
        self.animations.add(entity, endpoints, config)
    }

    /// Register a light animated by the named motion and colour presets.
    /// Unknown names fall back to `default`.
    pub fn spawn_light(&mut self, light: PointLight, motion: &str, color: &str) -> LightId {
        let motion = *self.presets.motion_preset_by_name(motion);
        let color = *self.presets.color_profile_by_name(color);
        let light = if motion.is_static() {
            light
        } else {
            light.with_pos(motion.base_position)
        };
        let id = self.lights.add(light, color, motion);
        log::debug!("light {:?} spawned at {:?}", id, light.position());
        id
    }

    /// Remove a light; its animation stops with it.
    pub fn remove_light(&mut self, id: LightId) -> bool {
        self.lights.remove(id).is_some()
    }

    /// Run one render tick: lights first, then object animations with the
    /// same clamped delta.
    pub fn tick(&mut self) -> TickReport {
        let frame = self
            .updater
            .process_frame_on_active_light_objects(self.lights.as_mut_slice());
        // completion handles are kept for one tick only; see AnimationState::completed
        let completed = self.animations.tick(frame.delta * 1000.0, &mut self.scene);
        TickReport {
            frame: frame.frame,
            seconds: frame.seconds,
            delta: frame.delta,
            completed,
        }
    }

    /// Flat light buffer for the renderer.
    pub fn write_light_buffer(&self, out: &mut Vec<f32>) {
        self.lights.write_buffer(out);
    }

    pub fn frame(&self) -> u64 {
        self.updater.clock().frame()
    }

    pub fn time(&self) -> &T {
        self.updater.time()
    }
}
