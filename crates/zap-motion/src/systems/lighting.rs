//! Light motion system: per-frame intensity, hue and position updates.
//!
//! Lights are persistent: they stay until explicitly removed. Each tick the
//! updater reads wall-clock time once, advances its frame clock, and updates
//! every active light. A light with a missing handle or motion profile is
//! logged and skipped; the rest of the frame still runs.

use glam::Vec3;
use crate::api::error::MotionError;
use crate::api::types::LightId;
use crate::components::color_shift::ColorShiftProfile;
use crate::components::light::{LightHandle, PointLight};
use crate::components::motion::{MotionProfile, OnEndBehavior, PathCategory};
use crate::core::time::{FrameClock, TimeSource};
use crate::extensions::color::hsv_to_rgb;
use super::oscillation::{Oscillator, OscillatorMode, Wave};
use super::paths::{eccentric_position, orbital_position};

/// Progress along a linear path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LinearTravel {
    /// Distance covered from `base_position` towards `target`.
    travelled: f32,
    finished: bool,
}

/// Runtime record of one animated light.
#[derive(Debug, Clone)]
pub struct LightRuntimeState<L = PointLight> {
    pub id: LightId,
    pub light: Option<L>,
    pub color: ColorShiftProfile,
    pub motion: Option<MotionProfile>,
    intensity_osc: Oscillator,
    hue_osc: Oscillator,
    motion_reversed: bool,
    linear: LinearTravel,
    last_update_time: Option<f64>,
    reported_missing: bool,
}

impl<L: LightHandle> LightRuntimeState<L> {
    pub fn new(id: LightId, light: L, color: ColorShiftProfile, motion: MotionProfile) -> Self {
        Self {
            id,
            light: Some(light),
            color,
            motion: Some(motion),
            intensity_osc: Oscillator::new(),
            hue_osc: Oscillator::new(),
            motion_reversed: false,
            linear: LinearTravel::default(),
            last_update_time: None,
            reported_missing: false,
        }
    }

    /// Whether the record has everything an update needs.
    pub fn check(&self) -> Result<(), MotionError> {
        if self.light.is_none() {
            return Err(MotionError::MissingLightHandle(self.id));
        }
        if self.motion.is_none() {
            return Err(MotionError::MissingMotionProfile(self.id));
        }
        Ok(())
    }

    /// Swap in a new motion profile and restart path progress.
    pub fn set_motion(&mut self, motion: MotionProfile) {
        self.motion = Some(motion);
        self.motion_reversed = false;
        self.linear = LinearTravel::default();
        self.last_update_time = None;
    }

    /// Swap in a new colour profile and restart both oscillators.
    pub fn set_color(&mut self, color: ColorShiftProfile) {
        self.color = color;
        self.intensity_osc = Oscillator::new();
        self.hue_osc = Oscillator::new();
    }

    /// Flip the direction of travel (orbits run backwards, linear paths head home).
    pub fn toggle_motion_reverse(&mut self) {
        self.motion_reversed = !self.motion_reversed;
    }

    pub fn is_motion_reversed(&self) -> bool {
        self.motion_reversed
    }

    /// Intensity is currently falling.
    pub fn is_intensity_reversed(&self) -> bool {
        self.intensity_osc.is_reversed()
    }

    /// Hue is currently moving down the colour wheel.
    pub fn is_hue_reversed(&self) -> bool {
        self.hue_osc.is_reversed()
    }

    /// A linear path that has stopped for good.
    pub fn is_motion_finished(&self) -> bool {
        self.linear.finished
    }

    fn direction_sign(&self) -> f32 {
        if self.motion_reversed { -1.0 } else { 1.0 }
    }

    /// Run one frame: hue, then intensity, then position.
    fn update(&mut self, now: f64, dt: f64, mode: OscillatorMode) {
        let (Some(light), Some(motion)) = (self.light.as_mut(), self.motion) else {
            return;
        };

        if self.color.hue_enabled() {
            let hue = self.hue_osc.sample(&Wave::hue(&self.color), mode, now, dt);
            light.set_diffuse(hsv_to_rgb(hue, self.color.saturation, self.color.value));
        }

        let intensity = self.intensity_osc.sample(&Wave::intensity(&self.color), mode, now, dt);
        light.set_intensity(intensity.max(0.0));

        let sign = if self.motion_reversed { -1.0 } else { 1.0 };
        match motion.category {
            PathCategory::Static => {}
            PathCategory::Orbital => light.set_position(orbital_position(&motion, now, sign)),
            PathCategory::Eccentric => light.set_position(eccentric_position(&motion, now, sign)),
            PathCategory::Linear => {
                let elapsed = match self.last_update_time {
                    Some(last) => (now - last).max(0.0),
                    None => 0.0,
                };
                if let Some(pos) = self.step_linear(&motion, elapsed) {
                    if let Some(light) = self.light.as_mut() {
                        light.set_position(pos);
                    }
                }
            }
        }
        self.last_update_time = Some(now);
    }

    /// Advance along a linear path by `elapsed` seconds. Returns the new
    /// position, or `None` when the path is degenerate.
    fn step_linear(&mut self, motion: &MotionProfile, elapsed: f64) -> Option<Vec3> {
        let span = motion.target - motion.base_position;
        let distance = span.length();
        if distance <= f32::EPSILON {
            return None;
        }
        let dir = span / distance;

        if !self.linear.finished {
            let speed = (dir * motion.base_speed).length();
            self.linear.travelled += self.direction_sign() * speed * elapsed as f32;

            if !self.motion_reversed && self.linear.travelled >= distance {
                match motion.on_end {
                    OnEndBehavior::Teleport => self.linear.travelled = 0.0,
                    OnEndBehavior::Reverse => {
                        self.linear.travelled = distance;
                        self.motion_reversed = true;
                    }
                    OnEndBehavior::None => {
                        self.linear.travelled = distance;
                        self.linear.finished = true;
                    }
                }
                if !motion.does_loop && motion.on_end != OnEndBehavior::Reverse {
                    self.linear.finished = true;
                }
            } else if self.motion_reversed && self.linear.travelled <= 0.0 {
                self.linear.travelled = 0.0;
                if motion.on_end == OnEndBehavior::Reverse {
                    self.motion_reversed = false;
                    if !motion.does_loop {
                        self.linear.finished = true;
                    }
                } else {
                    // reversed by hand: stop at the start
                    self.linear.finished = true;
                }
            }
        }

        Some(motion.base_position + dir * self.linear.travelled)
    }
}

/// One tick of the light updater.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Frame counter after this tick (wraps at the clock ceiling).
    pub frame: u64,
    /// Wall-clock seconds of this tick.
    pub seconds: f64,
    /// Clamped seconds since the previous tick.
    pub delta: f64,
}

/// Drives every active light once per render tick.
///
/// Owns its time source and frame clock, so independent updaters never
/// share state.
pub struct LightMotionUpdater<T: TimeSource> {
    time: T,
    clock: FrameClock,
    mode: OscillatorMode,
}

impl<T: TimeSource> LightMotionUpdater<T> {
    pub fn new(time: T) -> Self {
        Self::with_clock(time, FrameClock::new(), OscillatorMode::default())
    }

    pub fn with_clock(time: T, clock: FrameClock, mode: OscillatorMode) -> Self {
        Self { time, clock, mode }
    }

    /// Advance the clock and update every light in `lights`.
    pub fn process_frame_on_active_light_objects<L: LightHandle>(
        &mut self,
        lights: &mut [LightRuntimeState<L>],
    ) -> FrameTick {
        let now = self.time.now_seconds();
        let delta = self.clock.advance(now);
        let seconds = self.clock.seconds();

        for state in lights.iter_mut() {
            if let Err(err) = state.check() {
                if !state.reported_missing {
                    log::warn!("skipping light update: {}", err);
                    state.reported_missing = true;
                }
                continue;
            }
            state.reported_missing = false;
            state.update(seconds, delta, self.mode);
        }

        FrameTick { frame: self.clock.frame(), seconds, delta }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn mode(&self) -> OscillatorMode {
        self.mode
    }
}

/// Active light records, addressed by [`LightId`].
pub struct LightState<L = PointLight> {
    lights: Vec<LightRuntimeState<L>>,
    next_id: u32,
}

impl<L: LightHandle> LightState<L> {
    pub fn new() -> Self {
        Self { lights: Vec::new(), next_id: 1 }
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self { lights: Vec::with_capacity(max_lights), next_id: 1 }
    }

    /// Register a light. Returns its handle.
    pub fn add(&mut self, light: L, color: ColorShiftProfile, motion: MotionProfile) -> LightId {
        let id = LightId(self.next_id);
        self.next_id += 1;
        self.lights.push(LightRuntimeState::new(id, light, color, motion));
        id
    }

    /// Remove a light. Removal is the only way to cancel its animation.
    pub fn remove(&mut self, id: LightId) -> Option<LightRuntimeState<L>> {
        let idx = self.lights.iter().position(|l| l.id == id)?;
        Some(self.lights.remove(idx))
    }

    pub fn get(&self, id: LightId) -> Option<&LightRuntimeState<L>> {
        self.lights.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut LightRuntimeState<L>> {
        self.lights.iter_mut().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightRuntimeState<L>> {
        self.lights.iter()
    }

    /// Slice handed to [`LightMotionUpdater::process_frame_on_active_light_objects`].
    pub fn as_mut_slice(&mut self) -> &mut [LightRuntimeState<L>] {
        &mut self.lights
    }

    /// Remove all lights.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }
}

impl LightState<PointLight> {
    /// Write every attached light as flat floats (`LIGHT_FLOATS` each) for
    /// upload to a renderer.
    pub fn write_buffer(&self, out: &mut Vec<f32>) {
        out.clear();
        for light in self.lights.iter().filter_map(|l| l.light.as_ref()) {
            out.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(light)));
        }
    }
}

impl<L: LightHandle> Default for LightState<L> {
    fn default() -> Self {
        Self::new()
    }
}
