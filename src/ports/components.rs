//! Ports domain: the interactive plug attached to each door.

use bevy::prelude::*;

use crate::panels::DoorId;

/// Marks a door's plug entity. The plug sits at the door's outside anchor and
/// is what the pointer grabs to start a connection drag.
#[derive(Component, Debug, Clone, Copy)]
pub struct PortHandle {
    pub door: DoorId,
    pub goes_right: bool,
}
