pub mod manifest;
pub mod presets;
