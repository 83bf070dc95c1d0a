//! Transition domain: the four-node path between two connected doors.

use bevy::prelude::*;

use crate::panels::{DoorId, DoorPose, PanelId};

pub const PATH_NODES: usize = 4;
pub const LAST_NODE: usize = PATH_NODES - 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    pub position: Vec3,
    pub rotation: Quat,
    pub door: DoorId,
    pub panel: PanelId,
}

/// `[entered.inside, entered.outside, target.outside, target.inside]`,
/// all shifted on the non-travel axis so the path passes through the
/// character's current off-axis coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPath {
    nodes: [PathNode; PATH_NODES],
    pub is_horizontal: bool,
    pub offset: Vec3,
}

impl TransitionPath {
    pub fn build(entered: &DoorPose, target: &DoorPose, character: Vec3) -> Self {
        let offset = off_axis_offset(entered, character);
        let node = |pose: &DoorPose, outside: bool| {
            let anchor = if outside { pose.outside } else { pose.inside };
            PathNode {
                position: anchor.position + offset,
                rotation: anchor.rotation,
                door: pose.id,
                panel: pose.panel,
            }
        };

        Self {
            nodes: [
                node(entered, false),
                node(entered, true),
                node(target, true),
                node(target, false),
            ],
            is_horizontal: entered.is_horizontal,
            offset,
        }
    }

    pub fn node(&self, index: usize) -> &PathNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[PathNode; PATH_NODES] {
        &self.nodes
    }

    pub fn segment_length(&self, from: usize, to: usize) -> f32 {
        self.nodes[from].position.distance(self.nodes[to].position)
    }

    /// Fraction of segment `[0, 1]` already covered by `position`, clamped
    /// to `[0, 1]`. Zero for a degenerate segment.
    pub fn initial_progress(&self, position: Vec3) -> f32 {
        let total = self.segment_length(0, 1);
        if total <= f32::EPSILON {
            return 0.0;
        }
        (position.distance(self.nodes[0].position) / total).clamp(0.0, 1.0)
    }
}

/// Character position minus the entered door's inside anchor, kept only on
/// the axis perpendicular to travel (Y for horizontal doors, X for vertical).
fn off_axis_offset(entered: &DoorPose, character: Vec3) -> Vec3 {
    let delta = character - entered.inside.position;
    if entered.is_horizontal {
        Vec3::new(0.0, delta.y, 0.0)
    } else {
        Vec3::new(delta.x, 0.0, 0.0)
    }
}
