//! Ports domain: pointer state sampled once per frame.

use bevy::prelude::*;

/// Primary pointer as a world-space ray through the cursor.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PortPointer {
    pub ray: Option<PointerRay>,
    pub just_pressed: bool,
    pub just_released: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PointerRay {
    /// Where the ray crosses the plane `z = depth`. `None` when the ray runs
    /// parallel to it or the plane is behind the origin.
    pub fn at_depth(&self, depth: f32) -> Option<Vec3> {
        if self.direction.z.abs() <= f32::EPSILON {
            return None;
        }
        let distance = (depth - self.origin.z) / self.direction.z;
        if distance < 0.0 {
            return None;
        }
        Some(self.origin + self.direction * distance)
    }
}

impl PortPointer {
    /// Pointer projected onto a port's depth plane.
    pub fn project(&self, depth: f32) -> Option<Vec3> {
        self.ray?.at_depth(depth)
    }
}
