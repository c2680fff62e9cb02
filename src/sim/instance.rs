//! Per-slot render snapshot
//!
//! Each simulator keeps one `InstanceTransform` per pool slot and rewrites it
//! during its tick. A rendering adapter reads these slices (and can upload
//! them directly as an instance buffer); the simulation never calls into a
//! renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Transform of one pooled entity
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub position: [f32; 3],
    /// Euler angles (x, y, z) in radians
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    /// 0xRRGGBB, zero for entities without a tint
    pub color: u32,
    /// 1 when the slot is active
    pub active: u32,
}

impl InstanceTransform {
    /// Zero-scale placeholder for an inactive slot
    pub const HIDDEN: Self = Self {
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale: [0.0; 3],
        color: 0,
        active: 0,
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3, color: u32, active: bool) -> Self {
        Self {
            position: position.to_array(),
            rotation: rotation.to_array(),
            scale: scale.to_array(),
            color,
            active: active as u32,
        }
    }

    /// Hidden instance that keeps its last position
    pub fn hidden_at(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            ..Self::HIDDEN
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.scale.iter().any(|&s| s > 0.0)
    }
}
