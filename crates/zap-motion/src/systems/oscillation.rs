//! Bounded oscillators for light intensity and hue.
//!
//! `Analytic` evaluates a closed-form wave from wall-clock time and never
//! leaves its bounds. `PingPong` integrates a constant slope per frame and
//! flips direction after crossing a bound, so it can overshoot by at most one
//! frame's step (`amplitude * speed * dt`).

use std::f64::consts::TAU;
use crate::components::color_shift::ColorShiftProfile;
use crate::extensions::easing::lerp;

/// How oscillating light channels are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorMode {
    #[default]
    Analytic,
    /// Threshold-crossing ping-pong, kept for visual parity with older content.
    PingPong,
}

/// Parameters of one oscillating channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub base: f32,
    pub amplitude: f32,
    /// Angular speed, rad/s.
    pub speed: f32,
    /// Start phase, fraction of a cycle.
    pub phase: f32,
    pub looping: bool,
    pub auto_reverse: bool,
}

impl Wave {
    pub fn intensity(profile: &ColorShiftProfile) -> Self {
        Self {
            base: profile.base_intensity,
            amplitude: profile.intensity_amplitude,
            speed: profile.intensity_speed,
            phase: profile.intensity_phase,
            looping: profile.looping,
            auto_reverse: profile.auto_reverse,
        }
    }

    pub fn hue(profile: &ColorShiftProfile) -> Self {
        Self {
            base: profile.base_hue,
            amplitude: profile.hue_variation,
            speed: profile.hue_shift_speed,
            phase: profile.color_phase,
            looping: profile.looping,
            auto_reverse: profile.auto_reverse,
        }
    }

    pub fn bounds(&self) -> (f32, f32) {
        let a = self.amplitude.abs();
        (self.base - a, self.base + a)
    }
}

/// Unit-amplitude wave shape at `angle` radians: sine when reversing,
/// otherwise a rising sawtooth that passes through 0 at angle 0.
fn shape(angle: f64, auto_reverse: bool) -> f32 {
    if auto_reverse {
        angle.sin() as f32
    } else {
        let frac = (angle / TAU + 0.5).rem_euclid(1.0) as f32;
        lerp(-1.0, 1.0, frac)
    }
}

/// Runtime state of one oscillating channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Oscillator {
    value: Option<f32>,
    reversed: bool,
    origin: Option<f64>,
    bounces: u32,
    finished: bool,
}

impl Oscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the channel for a frame at wall-clock `now`, `dt` seconds
    /// after the previous one.
    pub fn sample(&mut self, wave: &Wave, mode: OscillatorMode, now: f64, dt: f64) -> f32 {
        match mode {
            OscillatorMode::Analytic => self.analytic(wave, now),
            OscillatorMode::PingPong => self.ping_pong(wave, dt),
        }
    }

    fn analytic(&mut self, wave: &Wave, now: f64) -> f32 {
        let amp = wave.amplitude.abs();
        let phase = wave.phase as f64 * TAU;
        if amp == 0.0 || wave.speed == 0.0 || !now.is_finite() {
            return wave.base + amp * shape(phase, wave.auto_reverse);
        }

        let speed = wave.speed as f64;
        let origin = *self.origin.get_or_insert(now);
        let mut t = now;
        if !wave.looping {
            let period = TAU / speed.abs();
            if now - origin >= period {
                t = origin + period;
                self.finished = true;
            }
        }

        // reduce in f64 so long runtimes keep full precision
        let angle = (t * speed).rem_euclid(TAU) + phase;
        // falling while the slope is negative
        self.reversed = if wave.auto_reverse { speed * angle.cos() < 0.0 } else { speed < 0.0 };
        let value = wave.base + amp * shape(angle, wave.auto_reverse);
        self.value = Some(value);
        value
    }

    fn ping_pong(&mut self, wave: &Wave, dt: f64) -> f32 {
        let amp = wave.amplitude.abs();
        let (lower, upper) = wave.bounds();

        let mut value = match self.value {
            Some(v) => v,
            None => {
                let phase = wave.phase as f64 * TAU;
                self.reversed = wave.auto_reverse && phase.cos() < 0.0;
                wave.base + amp * phase.sin() as f32
            }
        };
        if amp == 0.0 || self.finished || !dt.is_finite() {
            self.value = Some(value);
            return value;
        }

        let step = (amp as f64 * (wave.speed as f64).abs() * dt.max(0.0)) as f32;
        value += if self.reversed { -step } else { step };

        if !self.reversed && value >= upper {
            self.bounces += 1;
            if wave.auto_reverse {
                self.reversed = true;
            } else if wave.looping {
                value = lower + (value - upper);
            } else {
                value = upper;
                self.finished = true;
            }
        } else if self.reversed && value <= lower {
            self.bounces += 1;
            self.reversed = false;
        }
        if !wave.looping && wave.auto_reverse && self.bounces >= 2 {
            self.finished = true;
        }

        self.value = Some(value);
        value
    }

    /// Last value produced, if any.
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Whether the channel is currently falling: the ping-pong direction
    /// flag, or the sign of the analytic wave's slope.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// A non-looping wave has completed its cycle and now holds.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
