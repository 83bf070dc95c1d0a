//! Movement domain: player state machine, per-state handlers and the
//! collaborator seams they drive.

mod body;
mod bootstrap;
mod components;
mod events;
mod handlers;
mod machine;
mod resources;
mod state;
mod systems;


pub use body::{
    ANIM_FREE_MOVEMENT, ANIM_GROUNDED, ANIM_JUMP, ANIM_LADDER_MOVEMENT, CharacterBody,
    CharacterPresentation, PlayerBody, PlayerPresentation, to_local, to_world,
};
pub use components::{FrozenOffset, GameLayer, Player, PlayerAnimator, PlayerMotion};
pub use events::{PlayerStateEntered, PlayerStateExited, PlayerStateRequest};
pub use handlers::{FollowUp, FreezeCache};
pub use machine::{FrameInput, PlayerContext, PlayerStateMachine, StateNotification};
pub use resources::MovementInput;
pub use state::PlayerState;

pub(crate) use systems::run_state_machine;

use bevy::prelude::*;

use crate::content::MovementTuning;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    apply_gravity, detect_ground, follow_panel_while_frozen, read_input, request_mode_toggles,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<PlayerStateMachine>()
            .add_message::<PlayerStateRequest>()
            .add_message::<PlayerStateEntered>()
            .add_message::<PlayerStateExited>()
            .add_systems(PostStartup, spawn_player)
            .add_systems(
                Update,
                (
                    read_input,
                    detect_ground,
                    request_mode_toggles,
                    run_state_machine,
                    apply_gravity,
                    follow_panel_while_frozen,
                )
                    .chain(),
            );
    }
}
