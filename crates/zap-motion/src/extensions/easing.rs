// extensions/easing.rs
//
// Pure easing functions shared by object animation and light oscillation.
// No dependencies on Entity/Scene — just math.

use std::f32::consts::PI;
use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start: `t²`.
    QuadIn,
    /// Slow end: `t(2 − t)`.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    /// Sine wave easing (smooth).
    SineInOut,
}

impl Easing {
    pub const ALL: [Easing; 8] = [
        Self::Linear, Self::QuadIn, Self::QuadOut, Self::QuadInOut,
        Self::CubicIn, Self::CubicOut, Self::CubicInOut, Self::SineInOut,
    ];

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Inputs outside the range are clamped first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// Parse an easing name. Accepts camelCase (`easeInQuad`), snake_case
    /// (`ease_in_quad`) and short (`quad_in`) spellings; anything else is
    /// `Linear`.
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "linear" | "" => Easing::Linear,
            "easeinquad" | "quadin" => Easing::QuadIn,
            "easeoutquad" | "quadout" => Easing::QuadOut,
            "easeinoutquad" | "quadinout" => Easing::QuadInOut,
            "easeincubic" | "cubicin" => Easing::CubicIn,
            "easeoutcubic" | "cubicout" => Easing::CubicOut,
            "easeinoutcubic" | "cubicinout" => Easing::CubicInOut,
            "easeinoutsine" | "sineinout" => Easing::SineInOut,
            _ => {
                log::debug!("unknown easing `{}`, using linear", name);
                Easing::Linear
            }
        }
    }

    /// Canonical camelCase name.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "easeInQuad",
            Easing::QuadOut => "easeOutQuad",
            Easing::QuadInOut => "easeInOutQuad",
            Easing::CubicIn => "easeInCubic",
            Easing::CubicOut => "easeOutCubic",
            Easing::CubicInOut => "easeInOutCubic",
            Easing::SineInOut => "easeInOutSine",
        }
    }
}

impl From<String> for Easing {
    fn from(name: String) -> Self {
        Easing::from_name(&name)
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.name().to_string()
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn linear_is_identity_on_unit_interval() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            assert_eq!(Easing::Linear.apply(t), t);
        }
    }

    #[test]
    fn quad_variants_match_closed_forms() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            assert!((Easing::QuadIn.apply(t) - t * t).abs() < EPS);
            assert!((Easing::QuadOut.apply(t) - t * (2.0 - t)).abs() < EPS);
        }
    }

    #[test]
    fn quad_in_out_piecewise_points() {
        assert_eq!(Easing::QuadInOut.apply(0.0), 0.0);
        assert!((Easing::QuadInOut.apply(0.5) - 0.5).abs() < EPS);
        assert!((Easing::QuadInOut.apply(1.0) - 1.0).abs() < EPS);
        assert!((Easing::QuadInOut.apply(0.25) - 0.125).abs() < EPS);
    }

    #[test]
    fn all_variants_hit_endpoints() {
        for easing in Easing::ALL {
            assert!(easing.apply(0.0).abs() < EPS, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < EPS, "{:?} at 1", easing);
        }
    }

    #[test]
    fn nan_input_is_zero() {
        assert_eq!(Easing::QuadOut.apply(f32::NAN), 0.0);
    }

    #[test]
    fn names_parse_in_several_spellings() {
        assert_eq!(Easing::from_name("easeInQuad"), Easing::QuadIn);
        assert_eq!(Easing::from_name("ease_out_quad"), Easing::QuadOut);
        assert_eq!(Easing::from_name("quad-in-out"), Easing::QuadInOut);
        assert_eq!(Easing::from_name("wobble"), Easing::Linear);
        for easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.name()), easing);
        }
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Easing::QuadInOut).unwrap();
        assert_eq!(json, "\"easeInOutQuad\"");
        let back: Easing = serde_json::from_str("\"easeOutCubic\"").unwrap();
        assert_eq!(back, Easing::CubicOut);
    }

    #[test]
    fn lerp_with_eased_progress() {
        let result = lerp(100.0, 200.0, Easing::Linear.apply(0.5));
        assert!((result - 150.0).abs() < 0.001);
    }
}
