//! Movement domain: the per-frame state machine pass and panel-relative physics.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::content::MovementTuning;
use crate::movement::{
    FrameInput, FrozenOffset, MovementInput, Player, PlayerAnimator, PlayerBody, PlayerContext,
    PlayerMotion, PlayerPresentation, PlayerStateEntered, PlayerStateExited, PlayerStateMachine,
    PlayerStateRequest, StateNotification,
};
use crate::panels::{
    ActivePanel, ActivePanelChanged, DoorConnections, DoorIndex, Panel, active_panel_rotation,
    active_panel_transform,
};
use crate::transition::PanelTransition;

type PlayerQueryData = (
    &'static mut Transform,
    &'static mut LinearVelocity,
    &'static mut RigidBody,
    &'static mut PlayerMotion,
    &'static mut Visibility,
    &'static mut PlayerAnimator,
);

/// Panel-side resources the machine reads and drives.
#[derive(SystemParam)]
pub(crate) struct PanelWorld<'w, 's> {
    doors: Res<'w, DoorIndex>,
    connections: Res<'w, DoorConnections>,
    panels: Query<'w, 's, (&'static Panel, &'static GlobalTransform)>,
    transition: ResMut<'w, PanelTransition>,
    active_panel: ResMut<'w, ActivePanel>,
}

/// Incoming state requests and the notifications sent back out.
#[derive(SystemParam)]
pub(crate) struct StateMessages<'w, 's> {
    requests: MessageReader<'w, 's, PlayerStateRequest>,
    entered: MessageWriter<'w, PlayerStateEntered>,
    exited: MessageWriter<'w, PlayerStateExited>,
    panel_changed: MessageWriter<'w, ActivePanelChanged>,
}

/// Apply queued state requests, then run the current handler once.
pub(crate) fn run_state_machine(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut machine: ResMut<PlayerStateMachine>,
    mut world: PanelWorld,
    mut messages: StateMessages,
    mut player: Query<PlayerQueryData, With<Player>>,
) {
    let Ok((transform, velocity, rigid_body, motion, visibility, animator)) = player.single_mut()
    else {
        // Consume requests if no player
        for _ in messages.requests.read() {}
        return;
    };

    let grounded = motion.on_ground;
    let panel_rotation = active_panel_rotation(&world.active_panel, &world.panels);
    let mut body = PlayerBody {
        transform: transform.into_inner(),
        velocity: velocity.into_inner(),
        rigid_body: rigid_body.into_inner(),
        motion: motion.into_inner(),
    };
    let mut presentation = PlayerPresentation {
        visibility: visibility.into_inner(),
        animator: animator.into_inner(),
    };
    let mut notifications = Vec::new();
    let mut ctx = PlayerContext {
        body: &mut body,
        presentation: &mut presentation,
        transition: &mut world.transition,
        doors: &world.doors,
        connections: &world.connections,
        active_panel: &mut world.active_panel,
        tuning: &tuning,
        panel_rotation,
        notifications: &mut notifications,
    };

    for request in messages.requests.read() {
        machine.apply(*request, &mut ctx);
    }

    let frame = FrameInput {
        axis: input.axis,
        jump_pressed: input.jump_just_pressed,
        grounded,
        delta_secs: time.delta_secs(),
    };
    machine.execute(&frame, &mut ctx);

    for notification in notifications {
        match notification {
            StateNotification::Exited { state, next } => {
                messages.exited.write(PlayerStateExited { state, next });
            }
            StateNotification::Entered { state, previous } => {
                messages.entered.write(PlayerStateEntered { state, previous });
            }
            StateNotification::PanelChanged { previous, current } => {
                info!("Active panel {:?} -> {}", previous, current);
                messages.panel_changed.write(ActivePanelChanged { previous, current });
            }
        }
    }
}

/// Gravity pulls along the active panel's down vector.
pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    active_panel: Res<ActivePanel>,
    panels: Query<(&Panel, &GlobalTransform)>,
    mut query: Query<(&PlayerMotion, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();
    let down = (active_panel_rotation(&active_panel, &panels) * Vec3::NEG_Y).truncate();

    for (motion, mut velocity) in &mut query {
        if !motion.gravity_enabled || motion.asleep {
            continue;
        }
        velocity.0 += down * tuning.gravity * dt;
    }
}

/// Keep a frozen player pinned to its spot on the active panel.
pub(crate) fn follow_panel_while_frozen(
    machine: Res<PlayerStateMachine>,
    active_panel: Res<ActivePanel>,
    panels: Query<(&Panel, &GlobalTransform)>,
    mut query: Query<(&mut Transform, &mut FrozenOffset), With<Player>>,
) {
    let panel_transform = active_panel_transform(&active_panel, &panels);

    for (mut transform, mut offset) in &mut query {
        let Some(panel_transform) = panel_transform.filter(|_| machine.is_frozen()) else {
            offset.0 = None;
            continue;
        };

        match offset.0 {
            None => {
                let local = panel_transform
                    .affine()
                    .inverse()
                    .transform_point3(transform.translation);
                offset.0 = Some(local);
            }
            Some(local) => {
                transform.translation = panel_transform.transform_point(local);
                transform.rotation = panel_transform.rotation();
            }
        }
    }
}
