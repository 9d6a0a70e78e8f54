//! Declarative light intensity and hue oscillation.

use serde::{Deserialize, Serialize};

/// `base_hue` value that turns hue animation off.
pub const HUE_DISABLED: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorShiftProfile {
    pub base_intensity: f32,
    pub intensity_amplitude: f32,
    /// Angular speed of the intensity oscillation, rad/s.
    pub intensity_speed: f32,
    /// Start of the intensity cycle as a fraction of a cycle.
    pub intensity_phase: f32,
    /// Hue as a fraction of a turn. Negative disables hue animation.
    pub base_hue: f32,
    pub hue_variation: f32,
    /// Angular speed of the hue oscillation, rad/s.
    pub hue_shift_speed: f32,
    /// Start of the hue cycle, independent of `intensity_phase`.
    pub color_phase: f32,
    pub saturation: f32,
    pub value: f32,
    pub looping: bool,
    /// Swing back and forth; otherwise wrap from the top back to the bottom.
    pub auto_reverse: bool,
}

impl Default for ColorShiftProfile {
    fn default() -> Self {
        Self {
            base_intensity: 1.0,
            intensity_amplitude: 0.0,
            intensity_speed: 0.0,
            intensity_phase: 0.0,
            base_hue: HUE_DISABLED,
            hue_variation: 0.0,
            hue_shift_speed: 0.0,
            color_phase: 0.0,
            saturation: 1.0,
            value: 1.0,
            looping: true,
            auto_reverse: true,
        }
    }
}

impl ColorShiftProfile {
    /// Steady light at `intensity`, no hue animation.
    pub fn steady(intensity: f32) -> Self {
        Self { base_intensity: intensity, ..Self::default() }
    }

    pub fn with_pulse(mut self, amplitude: f32, speed: f32, phase: f32) -> Self {
        self.intensity_amplitude = amplitude.abs();
        self.intensity_speed = speed;
        self.intensity_phase = phase.rem_euclid(1.0);
        self
    }

    pub fn with_hue_shift(mut self, base_hue: f32, variation: f32, speed: f32, phase: f32) -> Self {
        self.base_hue = base_hue;
        self.hue_variation = variation.abs();
        self.hue_shift_speed = speed;
        self.color_phase = phase.rem_euclid(1.0);
        self
    }

    pub fn with_color(mut self, saturation: f32, value: f32) -> Self {
        self.saturation = saturation;
        self.value = value;
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_auto_reverse(mut self, auto_reverse: bool) -> Self {
        self.auto_reverse = auto_reverse;
        self
    }

    pub fn hue_enabled(&self) -> bool {
        self.base_hue >= 0.0
    }

    /// Range the intensity oscillates in.
    pub fn intensity_bounds(&self) -> (f32, f32) {
        let a = self.intensity_amplitude.abs();
        (self.base_intensity - a, self.base_intensity + a)
    }

    /// Range the hue oscillates in.
    pub fn hue_bounds(&self) -> (f32, f32) {
        let v = self.hue_variation.abs();
        (self.base_hue - v, self.base_hue + v)
    }
}
