// extensions/frame_shift.rs
//
// Per-frame incremental change of an object's transform.
// Pure: the caller applies the result and advances the PlaybackStatus.

use glam::Vec3;
use crate::components::playback::PlaybackStatus;
use super::easing::Easing;

/// Start and end transforms of an object animation, plus its easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationEndpoints {
    pub start_pos: Vec3,
    pub end_pos: Vec3,
    pub start_rotation: Vec3,
    pub end_rotation: Vec3,
    pub start_scale: Vec3,
    pub end_scale: Vec3,
    pub easing: Easing,
}

impl AnimationEndpoints {
    /// Endpoints with no change on any channel (rotation zero, scale one).
    pub fn fixed_at(pos: Vec3) -> Self {
        Self {
            start_pos: pos,
            end_pos: pos,
            start_rotation: Vec3::ZERO,
            end_rotation: Vec3::ZERO,
            start_scale: Vec3::ONE,
            end_scale: Vec3::ONE,
            easing: Easing::Linear,
        }
    }

    pub fn with_position(mut self, from: Vec3, to: Vec3) -> Self {
        self.start_pos = from;
        self.end_pos = to;
        self
    }

    pub fn with_rotation(mut self, from: Vec3, to: Vec3) -> Self {
        self.start_rotation = from;
        self.end_rotation = to;
        self
    }

    pub fn with_scale(mut self, from: Vec3, to: Vec3) -> Self {
        self.start_scale = from;
        self.end_scale = to;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// One frame's change to position, rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameShift {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// Fraction of one cycle covered by `delta_ms`.
///
/// A non-positive or non-finite duration counts as instantly complete (1.0).
pub fn progress_ratio(delta_ms: f64, duration_ms: f64) -> f32 {
    if !(duration_ms.is_finite() && duration_ms > 0.0) {
        return 1.0;
    }
    let ratio = delta_ms / duration_ms;
    if ratio.is_finite() { ratio.max(0.0) as f32 } else { 0.0 }
}

/// Compute the incremental transform change for a frame of `delta_ms`.
///
/// `progress = delta / effective_duration`, eased once and shared by all
/// three channels; the result is negated while the status is reversed.
/// Linear progress is used as is, so a frame longer than the cycle moves
/// proportionally further. Curved easings are only defined on [0, 1] and
/// saturate at the full span.
pub fn calculate_frame_shift(
    delta_ms: f64,
    endpoints: &AnimationEndpoints,
    status: &PlaybackStatus,
) -> FrameShift {
    let ratio = progress_ratio(delta_ms, status.config().effective_duration_ms());
    let eased = match endpoints.easing {
        Easing::Linear => ratio,
        easing => easing.apply(ratio),
    };
    let sign = if status.is_reversed() { -1.0 } else { 1.0 };
    let factor = eased * sign;

    FrameShift {
        position: (endpoints.end_pos - endpoints.start_pos) * factor,
        rotation: (endpoints.end_rotation - endpoints.start_rotation) * factor,
        scale: (endpoints.end_scale - endpoints.start_scale) * factor,
    }
}
