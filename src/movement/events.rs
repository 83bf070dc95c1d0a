//! Movement domain: state change requests and notifications.

use bevy::ecs::message::Message;

use crate::movement::state::PlayerState;

/// Raised by triggers, input and tooling; applied in arrival order at the
/// top of the state machine's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStateRequest {
    Change { state: PlayerState, force: bool },
    RestoreLast { force: bool },
    /// Freeze or pause key pressed again while in that mode.
    LeaveFreeze,
}

impl PlayerStateRequest {
    pub fn change(state: PlayerState) -> Self {
        Self::Change {
            state,
            force: false,
        }
    }
}

impl Message for PlayerStateRequest {}

#[derive(Debug)]
pub struct PlayerStateEntered {
    pub state: PlayerState,
    pub previous: PlayerState,
}

impl Message for PlayerStateEntered {}

#[derive(Debug)]
pub struct PlayerStateExited {
    pub state: PlayerState,
    pub next: PlayerState,
}

impl Message for PlayerStateExited {}
