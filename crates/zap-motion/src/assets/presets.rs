use std::collections::HashMap;
use glam::Vec3;
use crate::api::error::MotionError;
use crate::assets::manifest::PresetManifest;
use crate::components::color_shift::ColorShiftProfile;
use crate::components::motion::{MotionProfile, OnEndBehavior};

/// Canonical name of the neutral profile every registry carries.
pub const DEFAULT_PRESET: &str = "default";

/// Names that resolve to the neutral profile out of the box.
pub const NEUTRAL_ALIASES: &[&str] = &[
    "null", "blank", "empty", "placeholder", "basic", "white", "generic", "none", "neutral",
];

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Name-keyed profiles with aliases.
///
/// Lookups resolve `alias → canonical name → profile`. The `default` profile
/// is supplied at construction and cannot be removed, so [`PresetRegistry::get`]
/// always has something to return.
#[derive(Debug, Clone)]
pub struct PresetRegistry<P> {
    default: P,
    profiles: HashMap<String, P>,
    aliases: HashMap<String, String>,
}

impl<P> PresetRegistry<P> {
    /// Create a registry whose `default` entry is `default`, with the
    /// neutral aliases pointing at it.
    pub fn new(default: P) -> Self {
        let aliases = NEUTRAL_ALIASES
            .iter()
            .map(|a| (a.to_string(), DEFAULT_PRESET.to_string()))
            .collect();
        Self { default, profiles: HashMap::new(), aliases }
    }

    /// Register a new profile. Fails if the name is taken.
    pub fn insert(&mut self, name: &str, profile: P) -> Result<(), MotionError> {
        let key = normalize(name);
        if key == DEFAULT_PRESET || self.profiles.contains_key(&key) {
            return Err(MotionError::DuplicatePreset(key));
        }
        self.profiles.insert(key, profile);
        Ok(())
    }

    /// Register or replace a profile. `default` replaces the neutral profile.
    pub fn upsert(&mut self, name: &str, profile: P) {
        let key = normalize(name);
        if key == DEFAULT_PRESET {
            self.default = profile;
        } else {
            self.profiles.insert(key, profile);
        }
    }

    /// Point `alias` at an existing canonical profile.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) -> Result<(), MotionError> {
        let target = normalize(canonical);
        if target != DEFAULT_PRESET && !self.profiles.contains_key(&target) {
            return Err(MotionError::UnknownAlias { alias: alias.to_string(), target });
        }
        self.aliases.insert(normalize(alias), target);
        Ok(())
    }

    /// Canonical key for `name`, if it names a profile or alias.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let key = normalize(name);
        if key == DEFAULT_PRESET {
            return Some(DEFAULT_PRESET);
        }
        if let Some((canonical, _)) = self.profiles.get_key_value(&key) {
            return Some(canonical.as_str());
        }
        self.aliases.get(&key).map(String::as_str)
    }

    /// Look up a profile without falling back.
    pub fn try_get(&self, name: &str) -> Option<&P> {
        match self.resolve(name)? {
            DEFAULT_PRESET => Some(&self.default),
            canonical => self.profiles.get(canonical),
        }
    }

    /// Look up a profile, falling back to `default` on a miss.
    pub fn get(&self, name: &str) -> &P {
        self.try_get(name).unwrap_or_else(|| {
            log::debug!("preset `{}` not found, using `{}`", name, DEFAULT_PRESET);
            &self.default
        })
    }

    pub fn default_profile(&self) -> &P {
        &self.default
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Canonical names, excluding `default`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Number of canonical profiles, including `default`.
    pub fn len(&self) -> usize {
        self.profiles.len() + 1
    }
}

/// Built-in light motion presets.
pub fn builtin_motion_presets() -> PresetRegistry<MotionProfile> {
    let mut reg = PresetRegistry::new(MotionProfile::default());
    let builtins = [
        ("orbit_slow", MotionProfile::orbital(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0), Vec3::new(0.25, 0.0, 0.25))),
        ("orbit_fast", MotionProfile::orbital(Vec3::ZERO, Vec3::new(2.0, 0.0, 2.0), Vec3::new(1.5, 0.0, 1.5))),
        (
            "figure_eight",
            MotionProfile::orbital(Vec3::ZERO, Vec3::new(3.0, 1.0, 3.0), Vec3::new(0.5, 0.0, 1.0))
                .with_phase(Vec3::new(0.0, 0.0, 0.25)),
        ),
        ("bob", MotionProfile::orbital(Vec3::ZERO, Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 2.0, 0.0))),
        (
            "drift",
            MotionProfile::linear(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::splat(1.0))
                .with_on_end(OnEndBehavior::Reverse),
        ),
        ("comet", MotionProfile::eccentric(Vec3::ZERO, 8.0, 0.6, 0.4).with_bob(0.5, 0.8)),
    ];
    for (name, profile) in builtins {
        reg.upsert(name, profile);
    }
    reg
}

/// Built-in light colour presets.
pub fn builtin_color_presets() -> PresetRegistry<ColorShiftProfile> {
    let mut reg = PresetRegistry::new(ColorShiftProfile::default());
    let builtins = [
        ("candle", ColorShiftProfile::steady(0.9).with_pulse(0.15, 9.0, 0.0).with_hue_shift(0.08, 0.01, 3.0, 0.25)),
        ("pulse", ColorShiftProfile::steady(1.0).with_pulse(0.5, 2.0, 0.0)),
        ("rainbow", ColorShiftProfile::steady(1.0).with_hue_shift(0.5, 0.5, 0.5, 0.0).with_auto_reverse(false)),
        ("aurora", ColorShiftProfile::steady(0.7).with_pulse(0.2, 0.6, 0.5).with_hue_shift(0.4, 0.12, 0.3, 0.0)),
        ("ember", ColorShiftProfile::steady(0.6).with_pulse(0.3, 4.0, 0.1).with_hue_shift(0.03, 0.03, 1.2, 0.6)),
    ];
    for (name, profile) in builtins {
        reg.upsert(name, profile);
    }
    reg
}

/// Motion and colour registries used together when spawning lights.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    pub motion: PresetRegistry<MotionProfile>,
    pub color: PresetRegistry<ColorShiftProfile>,
}

impl PresetLibrary {
    pub fn builtin() -> Self {
        Self {
            motion: builtin_motion_presets(),
            color: builtin_color_presets(),
        }
    }

    /// Built-in presets extended (or overridden) by a manifest.
    pub fn from_manifest(manifest: &PresetManifest) -> Result<Self, MotionError> {
        let mut lib = Self::builtin();
        for (name, profile) in &manifest.motion {
            lib.motion.upsert(name, *profile);
        }
        for (name, profile) in &manifest.color {
            lib.color.upsert(name, *profile);
        }
        for (alias, target) in &manifest.aliases.motion {
            lib.motion.add_alias(alias, target)?;
        }
        for (alias, target) in &manifest.aliases.color {
            lib.color.add_alias(alias, target)?;
        }
        log::info!(
            "loaded preset manifest: {} motion, {} color",
            manifest.motion.len(),
            manifest.color.len()
        );
        Ok(lib)
    }

    /// Parse a JSON manifest and build the library from it.
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        Self::from_manifest(&PresetManifest::from_json(json)?)
    }

    pub fn motion_preset_by_name(&self, name: &str) -> &MotionProfile {
        self.motion.get(name)
    }

    pub fn color_profile_by_name(&self, name: &str) -> &ColorShiftProfile {
        self.color.get(name)
    }
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::motion::PathCategory;

    #[test]
    fn miss_returns_the_default_object() {
        let lib = PresetLibrary::builtin();
        assert!(std::ptr::eq(
            lib.motion_preset_by_name("nonexistent-xyz"),
            lib.motion_preset_by_name("default"),
        ));
        assert!(std::ptr::eq(
            lib.color_profile_by_name("nonexistent-xyz"),
            lib.color_profile_by_name("default"),
        ));
    }

    #[test]
    fn neutral_aliases_share_the_default() {
        let reg = builtin_color_presets();
        for alias in NEUTRAL_ALIASES {
            assert!(std::ptr::eq(reg.get(alias), reg.default_profile()), "{}", alias);
        }
        assert!(reg.try_get("does-not-exist").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let reg = builtin_motion_presets();
        assert_eq!(reg.get("Orbit_Slow").category, PathCategory::Orbital);
        assert_eq!(reg.resolve(" BLANK "), Some(DEFAULT_PRESET));
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut reg = PresetRegistry::new(0u8);
        reg.insert("one", 1).unwrap();
        assert!(matches!(reg.insert("ONE", 2), Err(MotionError::DuplicatePreset(_))));
        assert!(matches!(reg.insert("default", 3), Err(MotionError::DuplicatePreset(_))));
        assert_eq!(*reg.get("one"), 1);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn alias_must_point_somewhere() {
        let mut reg = PresetRegistry::new(0u8);
        reg.insert("flicker", 5).unwrap();
        reg.add_alias("torch", "flicker").unwrap();
        assert_eq!(*reg.get("torch"), 5);
        assert!(matches!(
            reg.add_alias("lamp", "missing"),
            Err(MotionError::UnknownAlias { .. })
        ));
    }

    #[test]
    fn upsert_default_replaces_neutral() {
        let mut reg = PresetRegistry::new(0u8);
        reg.upsert("DEFAULT", 9);
        assert_eq!(*reg.get("anything"), 9);
        assert_eq!(*reg.get("white"), 9);
    }

    #[test]
    fn builtins_are_registered() {
        let lib = PresetLibrary::builtin();
        for name in ["orbit_slow", "orbit_fast", "figure_eight", "bob", "drift", "comet"] {
            assert!(lib.motion.contains(name), "{}", name);
        }
        for name in ["candle", "pulse", "rainbow", "aurora", "ember"] {
            assert!(lib.color.contains(name), "{}", name);
        }
        assert_eq!(lib.motion_preset_by_name("comet").category, PathCategory::Eccentric);
        assert!(lib.color_profile_by_name("rainbow").hue_enabled());
    }

    #[test]
    fn manifest_extends_builtins() {
        let json = r#"{
            "motion": {
                "sway": { "category": "orbital", "radius": [1.0, 0.0, 0.0], "base_speed": [2.0, 0.0, 0.0] }
            },
            "color": {
                "default": { "base_intensity": 0.5 }
            },
            "aliases": {
                "motion": { "swing": "sway" },
                "color": { "dim": "default" }
            }
        }"#;
        let lib = PresetLibrary::from_json(json).unwrap();
        assert_eq!(lib.motion_preset_by_name("swing").radius.x, 1.0);
        assert_eq!(lib.color_profile_by_name("dim").base_intensity, 0.5);
        assert_eq!(lib.color_profile_by_name("unknown").base_intensity, 0.5);
        assert!(lib.motion.contains("orbit_fast"));
    }

    #[test]
    fn manifest_with_dangling_alias_fails() {
        let json = r#"{ "aliases": { "motion": { "swing": "nowhere" } } }"#;
        assert!(matches!(
            PresetLibrary::from_json(json),
            Err(MotionError::UnknownAlias { .. })
        ));
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(matches!(PresetLibrary::from_json("{ nope"), Err(MotionError::Manifest(_))));
    }
}
