use thiserror::Error;

use crate::api::types::LightId;

/// Errors raised by configuration surfaces of the motion engine.
///
/// Per-frame work never returns these: the updaters log them and skip the
/// offending object so the rest of the frame still runs.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("animation duration must be positive and finite, got {0} ms")]
    InvalidDuration(f64),
    #[error("speed multiplier must be positive and finite, got {0}")]
    InvalidSpeedMultiplier(f64),
    #[error("reset speed multiplier must be positive and finite, got {0}")]
    InvalidResetMultiplier(f64),
    #[error("alias `{alias}` points at unknown preset `{target}`")]
    UnknownAlias { alias: String, target: String },
    #[error("preset `{0}` is already registered")]
    DuplicatePreset(String),
    #[error("light {0:?} has no handle attached")]
    MissingLightHandle(LightId),
    #[error("light {0:?} has no motion profile")]
    MissingMotionProfile(LightId),
    #[error("preset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
