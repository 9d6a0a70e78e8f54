pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::engine::{MotionEngine, MotionConfig, TickReport};
pub use api::error::MotionError;
pub use api::types::{EntityId, AnimationId, LightId};
pub use components::entity::Entity;
pub use components::playback::{PlaybackConfig, PlaybackState, PlaybackStatus};
pub use components::motion::{MotionProfile, PathCategory, OnEndBehavior};
pub use components::color_shift::ColorShiftProfile;
pub use components::light::{LightHandle, PointLight, LIGHT_FLOATS};
pub use core::scene::Scene;
pub use core::time::{TimeSource, MonotonicTime, ManualTime, FrameClock, FRAME_WRAP_CEILING};
pub use assets::manifest::PresetManifest;
pub use assets::presets::{PresetRegistry, PresetLibrary};
pub use systems::animation::{Animation, AnimationState};
pub use systems::lighting::{LightMotionUpdater, LightRuntimeState, LightState, FrameTick};
pub use systems::oscillation::OscillatorMode;

pub use extensions::{
    Easing, lerp, hsv_to_rgb,
    calculate_frame_shift, progress_ratio, AnimationEndpoints, FrameShift,
};
