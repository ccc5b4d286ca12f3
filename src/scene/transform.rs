//! Local spatial state of a scene node

use crate::rasterizer::{Mat4, Quat, Vec4};

/// Position, orientation and scale relative to the parent node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec4,
    pub rotation: Quat,
    pub scale: Vec4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec4::point(0.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec4::ONE,
        }
    }
}

impl Transform {
    pub fn new(position: Vec4, rotation: Quat, scale: Vec4) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Local matrix: rotation applies first, then scale, then translation
    pub fn to_matrix(&self) -> Mat4 {
        let mut base = Mat4::IDENTITY;
        base.set(0, 3, self.position.x);
        base.set(1, 3, self.position.y);
        base.set(2, 3, self.position.z);
        base.set(0, 0, self.scale.x);
        base.set(1, 1, self.scale.y);
        base.set(2, 2, self.scale.z);
        base * self.rotation.to_rotation_matrix()
    }

    /// Append a rotation in local space
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = self.rotation * rotation;
    }

    pub fn translate(&mut self, delta: Vec4) {
        self.position += delta;
    }
}
