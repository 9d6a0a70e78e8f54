pub mod color_shift;
pub mod entity;
pub mod light;
pub mod motion;
pub mod playback;
