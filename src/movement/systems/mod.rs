//! Movement domain: system modules for the player update.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::detect_ground;
pub(crate) use input::{read_input, request_mode_toggles, toggle_request};
pub(crate) use movement::{apply_gravity, follow_panel_while_frozen, run_state_machine};
