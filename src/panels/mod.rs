//! Panels domain: panels, doors, the connection graph and door triggers.

mod components;
mod events;
mod graph;
mod registry;
mod resources;
mod spawn;
mod systems;


pub use components::{Door, DoorId, DoorTrigger, Ground, Panel, PanelGeometry, PanelId, Wall};
pub use events::{ActivePanelChanged, DoorsConnected, DoorsDisconnected, PanelEnableRequest};
pub use graph::{ConnectionError, DoorConnections, TransitionCooldown, door_entry_allowed};
pub use registry::{Anchor, DoorIndex, DoorPose, check_connection_angle};
pub use resources::{ActivePanel, PuzzleArea};
pub use systems::{active_panel_rotation, active_panel_transform};

use bevy::prelude::*;

use crate::movement::run_state_machine;
use crate::panels::spawn::spawn_puzzle_area;
use crate::panels::systems::{
    apply_panel_enable, detect_door_entry, rotate_active_panel, start_exit_cooldown,
    sync_door_index, tick_transition_cooldown,
};

pub struct PanelsPlugin;

impl Plugin for PanelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DoorConnections>()
            .init_resource::<DoorIndex>()
            .init_resource::<ActivePanel>()
            .init_resource::<TransitionCooldown>()
            .add_message::<DoorsConnected>()
            .add_message::<DoorsDisconnected>()
            .add_message::<ActivePanelChanged>()
            .add_message::<PanelEnableRequest>()
            .add_systems(Startup, spawn_puzzle_area)
            .add_systems(Update, tick_transition_cooldown)
            .add_systems(
                Update,
                (sync_door_index, detect_door_entry)
                    .chain()
                    .before(run_state_machine),
            )
            .add_systems(
                Update,
                (start_exit_cooldown, apply_panel_enable, rotate_active_panel)
                    .after(run_state_machine),
            );
    }
}
