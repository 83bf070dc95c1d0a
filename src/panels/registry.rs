//! Panels domain: per-frame world poses of every door and the angle rule.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::panels::components::{Door, DoorId, PanelId};

/// World position and rotation of a door anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Anchor {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

/// A door resolved into world space.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorPose {
    pub id: DoorId,
    pub panel: PanelId,
    pub inside: Anchor,
    pub outside: Anchor,
    pub is_horizontal: bool,
    pub goes_right: bool,
}

impl DoorPose {
    pub fn from_door(door: &Door, transform: &GlobalTransform) -> Self {
        let rotation = transform.rotation();
        Self {
            id: door.id,
            panel: door.panel,
            inside: Anchor::new(transform.transform_point(door.inside_offset), rotation),
            outside: Anchor::new(transform.transform_point(door.outside_offset), rotation),
            is_horizontal: door.is_horizontal,
            goes_right: door.goes_right,
        }
    }

    /// Direction the door opens toward: from its inside anchor to its outside
    /// anchor. Falls back to the outside anchor's local +X when both anchors
    /// coincide.
    pub fn facing(&self) -> Vec3 {
        (self.outside.position - self.inside.position)
            .try_normalize()
            .unwrap_or_else(|| self.outside.rotation * Vec3::X)
    }
}

/// Whether connecting `a` and `b` keeps the transition path from doubling
/// back through panel geometry: the angle between their facings must exceed
/// `angle_limit_degrees`. Symmetric in its arguments.
pub fn check_connection_angle(a: &DoorPose, b: &DoorPose, angle_limit_degrees: f32) -> bool {
    let angle = a.facing().angle_between(b.facing());
    angle.to_degrees() > angle_limit_degrees
}

/// World poses of every door, rebuilt each frame from the ECS so rotated
/// panels are always reflected.
#[derive(Resource, Debug, Default)]
pub struct DoorIndex {
    doors: HashMap<DoorId, DoorPose>,
}

impl DoorIndex {
    pub fn get(&self, id: DoorId) -> Option<&DoorPose> {
        self.doors.get(&id)
    }

    pub fn insert(&mut self, pose: DoorPose) {
        self.doors.insert(pose.id, pose);
    }

    pub fn clear(&mut self) {
        self.doors.clear();
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }
}
