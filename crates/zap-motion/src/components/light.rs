//! Light handles the motion updater writes into.
//!
//! Any renderer-side light can be driven by implementing [`LightHandle`];
//! [`PointLight`] is the built-in flat representation.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Floats per [`PointLight`] in a flat light buffer.
pub const LIGHT_FLOATS: usize = 8;

/// Mutable view of a light: intensity, diffuse colour, position.
pub trait LightHandle {
    fn intensity(&self) -> f32;
    fn set_intensity(&mut self, intensity: f32);
    fn diffuse(&self) -> Vec3;
    fn set_diffuse(&mut self, rgb: Vec3);
    fn position(&self) -> Vec3;
    fn set_position(&mut self, pos: Vec3);
}

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, radius]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub radius: f32,
}

impl PointLight {
    /// - `pos`: World-space position
    /// - `color`: RGB color (typically [0..1] but can exceed 1.0 for HDR)
    /// - `intensity`: Light strength multiplier
    /// - `radius`: Falloff distance in world units
    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32, radius: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            radius,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.set_position(pos);
        self
    }
}

impl LightHandle for PointLight {
    fn intensity(&self) -> f32 {
        self.intensity
    }

    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    fn diffuse(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    fn set_diffuse(&mut self, rgb: Vec3) {
        self.r = rgb.x;
        self.g = rgb.y;
        self.b = rgb.z;
    }

    fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    fn set_position(&mut self, pos: Vec3) {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
    }
}
