pub mod animation;
pub mod lighting;
pub mod oscillation;
pub mod paths;
