//! Declarative light motion paths.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Category names that mean "no motion".
pub const STATIC_SENTINELS: &[&str] = &[
    "static", "default", "blank", "placeholder", "none", "null", "empty",
];

/// Shape of a light's movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PathCategory {
    #[default]
    Static,
    /// Straight travel from `base_position` towards `target`.
    Linear,
    /// Independent per-axis circular motion around `base_position`.
    Orbital,
    /// Elliptical orbit in the XZ plane with a vertical bob.
    Eccentric,
}

impl PathCategory {
    /// Parse a category name. Sentinels and unknown names are `Static`.
    pub fn from_name(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase();
        match key.as_str() {
            "linear" => PathCategory::Linear,
            "orbital" | "orbit" => PathCategory::Orbital,
            "eccentric" | "elliptical" => PathCategory::Eccentric,
            k if STATIC_SENTINELS.contains(&k) => PathCategory::Static,
            _ => {
                log::debug!("unknown path category `{}`, treating as static", name);
                PathCategory::Static
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PathCategory::Static => "static",
            PathCategory::Linear => "linear",
            PathCategory::Orbital => "orbital",
            PathCategory::Eccentric => "eccentric",
        }
    }
}

impl From<String> for PathCategory {
    fn from(name: String) -> Self {
        PathCategory::from_name(&name)
    }
}

impl From<PathCategory> for String {
    fn from(category: PathCategory) -> Self {
        category.name().to_string()
    }
}

/// What a linear path does when it reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnEndBehavior {
    /// Jump back to the start of the path.
    Teleport,
    /// Travel back the way it came.
    Reverse,
    /// Hold at the target.
    #[default]
    None,
}

/// Periodic or linear path of a light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    pub category: PathCategory,
    /// Path start for `Linear`, centre for `Orbital` and `Eccentric`.
    pub base_position: Vec3,
    /// End of a `Linear` path.
    pub target: Vec3,
    /// Per-axis angular speed (rad/s) for orbits, units/s for linear travel.
    pub base_speed: Vec3,
    /// Per-axis orbit radius. `x` is the semi-major axis of an eccentric orbit.
    pub radius: Vec3,
    /// Per-axis start phase as a fraction of a cycle, in [0, 1).
    pub start_phase: Vec3,
    /// Orbit eccentricity in [0, 1); only used by `Eccentric`.
    pub eccentricity: f32,
    pub does_loop: bool,
    pub on_end: OnEndBehavior,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            category: PathCategory::Static,
            base_position: Vec3::ZERO,
            target: Vec3::ZERO,
            base_speed: Vec3::ZERO,
            radius: Vec3::ZERO,
            start_phase: Vec3::ZERO,
            eccentricity: 0.0,
            does_loop: true,
            on_end: OnEndBehavior::None,
        }
    }
}

impl MotionProfile {
    pub fn fixed(at: Vec3) -> Self {
        Self { base_position: at, target: at, ..Self::default() }
    }

    pub fn linear(from: Vec3, to: Vec3, speed: Vec3) -> Self {
        Self {
            category: PathCategory::Linear,
            base_position: from,
            target: to,
            base_speed: speed,
            ..Self::default()
        }
    }

    pub fn orbital(center: Vec3, radius: Vec3, speed: Vec3) -> Self {
        Self {
            category: PathCategory::Orbital,
            base_position: center,
            target: center,
            base_speed: speed,
            radius,
            ..Self::default()
        }
    }

    /// Elliptical orbit: `semi_major` along X, `bob` amplitude on Y.
    pub fn eccentric(center: Vec3, semi_major: f32, eccentricity: f32, speed: f32) -> Self {
        Self {
            category: PathCategory::Eccentric,
            base_position: center,
            target: center,
            base_speed: Vec3::new(speed, 0.0, 0.0),
            radius: Vec3::new(semi_major, 0.0, 0.0),
            eccentricity: eccentricity.clamp(0.0, 0.99),
            ..Self::default()
        }
    }

    /// Vertical bob for eccentric orbits.
    pub fn with_bob(mut self, amplitude: f32, speed: f32) -> Self {
        self.radius.y = amplitude;
        self.base_speed.y = speed;
        self
    }

    /// Start phase per axis, wrapped into [0, 1).
    pub fn with_phase(mut self, phase: Vec3) -> Self {
        self.start_phase = Vec3::new(
            phase.x.rem_euclid(1.0),
            phase.y.rem_euclid(1.0),
            phase.z.rem_euclid(1.0),
        );
        self
    }

    pub fn with_on_end(mut self, on_end: OnEndBehavior) -> Self {
        self.on_end = on_end;
        self
    }

    pub fn with_loop(mut self, does_loop: bool) -> Self {
        self.does_loop = does_loop;
        self
    }

    pub fn is_static(&self) -> bool {
        self.category == PathCategory::Static
    }
}
