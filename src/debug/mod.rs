//! Developer tooling for iterating on puzzle layouts.
//!
//! Features:
//! - F1: info overlay (state, active panel, connections) and door gizmos
//! - F2: reset the character to the puzzle start
//! - F3: force free movement
//! - F4: toggle the panel after the active one

mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use state::DebugState;
pub use systems::DebugInfoOverlay;

use bevy::prelude::*;

use crate::debug::systems::{
    apply_pending_reset, draw_door_overlay, handle_debug_hotkeys, toggle_debug_overlay,
    update_debug_info_overlay, update_status_message,
};
use crate::movement::run_state_machine;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (toggle_debug_overlay, handle_debug_hotkeys)
                    .chain()
                    .before(run_state_machine),
            )
            .add_systems(
                Update,
                (
                    apply_pending_reset,
                    update_status_message,
                    update_debug_info_overlay,
                    draw_door_overlay,
                )
                    .chain()
                    .after(run_state_machine),
            );
    }
}
