//! Closed-form light paths — pure math, no light or engine state.
//!
//! Angles are computed in f64 and reduced modulo 2π before narrowing, so
//! positions stay stable after days of wall-clock time.

use std::f64::consts::TAU;
use glam::Vec3;
use crate::components::motion::MotionProfile;

/// `t * sign * speed + phase * 2π`, reduced to [0, 2π) plus the phase offset.
#[inline]
pub fn phase_angle(t: f64, speed: f32, sign: f32, phase: f32) -> f64 {
    (t * sign as f64 * speed as f64).rem_euclid(TAU) + phase as f64 * TAU
}

/// Per-axis orbit: X and Z follow cosine, Y follows sine, each with its own
/// speed, radius and phase. Unequal speeds give Lissajous-like paths.
pub fn orbital_position(profile: &MotionProfile, t: f64, sign: f32) -> Vec3 {
    let c = profile.base_position;
    let r = profile.radius;
    let s = profile.base_speed;
    let p = profile.start_phase;

    let ax = phase_angle(t, s.x, sign, p.x);
    let ay = phase_angle(t, s.y, sign, p.y);
    let az = phase_angle(t, s.z, sign, p.z);

    Vec3::new(
        c.x + r.x * ax.cos() as f32,
        c.y + r.y * ay.sin() as f32,
        c.z + r.z * az.cos() as f32,
    )
}

/// Solve Kepler's equation `E - e·sin(E) = M` by Newton-Raphson.
/// `mean_anomaly` in radians, returns the eccentric anomaly in radians.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ea = if eccentricity > 0.8 { std::f64::consts::PI } else { mean_anomaly };
    for _ in 0..15 {
        let delta = ea - eccentricity * ea.sin() - mean_anomaly;
        let derivative = 1.0 - eccentricity * ea.cos();
        ea -= delta / derivative;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Elliptical orbit in the XZ plane with the centre at one focus.
///
/// Mean anomaly advances at `speed.x`; `radius.x` is the semi-major axis.
/// Y bobs as `radius.y * sin(t * speed.y + phase.y * 2π)`.
pub fn eccentric_position(profile: &MotionProfile, t: f64, sign: f32) -> Vec3 {
    let c = profile.base_position;
    let a = profile.radius.x as f64;
    let e = (profile.eccentricity as f64).clamp(0.0, 0.99);
    let b = a * (1.0 - e * e).sqrt();

    let mean_anomaly = phase_angle(t, profile.base_speed.x, sign, profile.start_phase.x);
    let ea = solve_kepler(mean_anomaly, e);

    let bob = phase_angle(t, profile.base_speed.y, sign, profile.start_phase.y);

    Vec3::new(
        c.x + (a * (ea.cos() - e)) as f32,
        c.y + profile.radius.y * bob.sin() as f32,
        c.z + (b * ea.sin()) as f32,
    )
}
