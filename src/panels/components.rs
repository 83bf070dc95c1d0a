//! Panels domain: identifiers and entity components for panels and doors.

use bevy::prelude::*;

/// Stable identifier of a door, unique across the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct DoorId(pub u32);

/// Stable identifier of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct PanelId(pub u32);

impl std::fmt::Display for DoorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "door#{}", self.0)
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Root entity of a panel. Doors and geometry are its children, so rotating
/// the panel carries everything with it.
#[derive(Component, Debug)]
pub struct Panel {
    pub id: PanelId,
    pub enabled: bool,
}

impl Panel {
    pub fn new(id: PanelId) -> Self {
        Self { id, enabled: true }
    }
}

/// Collidable geometry owned by a panel, toggled together with it.
#[derive(Component, Debug)]
pub struct PanelGeometry {
    pub panel: PanelId,
}

/// A connection endpoint attached to a panel.
///
/// Anchors are offsets in the door's local frame; their world pose is read
/// from the door's `GlobalTransform` every frame (see `DoorIndex`).
#[derive(Component, Debug, Clone)]
pub struct Door {
    pub id: DoorId,
    pub panel: PanelId,
    /// true = left/right connector, false = vertical (ladder) connector
    pub is_horizontal: bool,
    pub goes_right: bool,
    pub inside_offset: Vec3,
    pub outside_offset: Vec3,
}

/// Sensor on a door that starts a transition when the player walks in.
#[derive(Component, Debug)]
pub struct DoorTrigger {
    pub door: DoorId,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
