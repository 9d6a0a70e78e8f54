// extensions/mod.rs
//
// Pure math shared by the animation and lighting systems.
// Nothing here touches Scene or light state.

pub mod color;
pub mod easing;
pub mod frame_shift;

pub use color::hsv_to_rgb;
pub use easing::{Easing, lerp};
pub use frame_shift::{calculate_frame_shift, progress_ratio, AnimationEndpoints, FrameShift};
