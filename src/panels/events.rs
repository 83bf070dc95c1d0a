//! Panels domain: messages for connections, active panel, and panel toggling.

use bevy::ecs::message::Message;

use crate::panels::components::{DoorId, PanelId};

#[derive(Debug)]
pub struct DoorsConnected {
    pub a: DoorId,
    pub b: DoorId,
}

impl Message for DoorsConnected {}

#[derive(Debug)]
pub struct DoorsDisconnected {
    pub a: DoorId,
    pub b: DoorId,
}

impl Message for DoorsDisconnected {}

/// The transition reached a node owned by a different panel.
#[derive(Debug)]
pub struct ActivePanelChanged {
    pub previous: Option<PanelId>,
    pub current: PanelId,
}

impl Message for ActivePanelChanged {}

/// Request to show/hide a panel's geometry and colliders as one unit.
#[derive(Debug)]
pub struct PanelEnableRequest {
    pub panel: PanelId,
    pub enabled: bool,
}

impl Message for PanelEnableRequest {}
