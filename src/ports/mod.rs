//! Ports domain: dragging connections between door plugs in edit mode.

mod components;
mod editor;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::PortHandle;
pub use editor::{
    ConnectionLine, ConnectionPorts, DragGesture, EditOutcome, PlugSprite, PortState,
    angle_within_limit, candidate_angle_ok,
};
pub use resources::{PointerRay, PortPointer};

use bevy::prelude::*;

use crate::content::PortTuning;
use crate::movement::run_state_machine;
use crate::ports::systems::{
    begin_port_drag, cancel_drag_outside_edit, draw_connection_lines, end_port_drag,
    register_ports, track_pointer, update_plug_sprites, update_port_drag,
};

pub struct PortsPlugin;

impl Plugin for PortsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PortTuning>()
            .init_resource::<ConnectionPorts>()
            .init_resource::<PortPointer>()
            .add_systems(
                Update,
                (
                    register_ports,
                    track_pointer,
                    cancel_drag_outside_edit,
                    begin_port_drag,
                    update_port_drag,
                    end_port_drag,
                    update_plug_sprites,
                    draw_connection_lines,
                )
                    .chain()
                    .after(run_state_machine),
            );
    }
}
