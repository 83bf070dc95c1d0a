//! Movement domain: input sampling and mode toggles.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{MovementInput, PlayerState, PlayerStateMachine, PlayerStateRequest};

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (ladders, vertical doors)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    let mut rotate = 0.0;
    if keyboard.pressed(KeyCode::KeyQ) {
        rotate += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        rotate -= 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_just_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.freeze_just_pressed = keyboard.just_pressed(KeyCode::Tab);
    input.pause_just_pressed =
        keyboard.just_pressed(KeyCode::Escape) || keyboard.just_pressed(KeyCode::KeyP);
    input.rotate = rotate;
}

/// Freeze and pause keys toggle their mode on and off.
pub(crate) fn request_mode_toggles(
    input: Res<MovementInput>,
    machine: Res<PlayerStateMachine>,
    mut requests: MessageWriter<PlayerStateRequest>,
) {
    if let Some(request) = toggle_request(
        machine.current(),
        input.pause_just_pressed,
        input.freeze_just_pressed,
    ) {
        requests.write(request);
    }
}

/// Pause wins over freeze when both keys land on the same frame.
pub(crate) fn toggle_request(
    current: PlayerState,
    pause_pressed: bool,
    freeze_pressed: bool,
) -> Option<PlayerStateRequest> {
    if pause_pressed {
        return Some(if current == PlayerState::PausedGameFreeze {
            PlayerStateRequest::LeaveFreeze
        } else {
            PlayerStateRequest::change(PlayerState::PausedGameFreeze)
        });
    }

    if freeze_pressed {
        return Some(if current == PlayerState::PanelEditFreeze {
            PlayerStateRequest::LeaveFreeze
        } else {
            PlayerStateRequest::change(PlayerState::PanelEditFreeze)
        });
    }
    None
}
