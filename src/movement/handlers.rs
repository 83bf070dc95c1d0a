//! Movement domain: per-state enter / execute / exit behavior.
//!
//! The handler set is closed, so each hook is a `match` over [`PlayerState`].

use bevy::prelude::*;

use crate::movement::body::{
    ANIM_FREE_MOVEMENT, ANIM_GROUNDED, ANIM_JUMP, ANIM_LADDER_MOVEMENT, CharacterBody, to_local,
    to_world,
};
use crate::movement::machine::{FrameInput, PlayerContext, StateNotification};
use crate::movement::state::PlayerState;
use crate::transition::TransitionStep;

/// Request raised by a handler during `execute`, applied by the machine once
/// the handler has returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Change { state: PlayerState, force: bool },
    /// The transition path is exhausted.
    LeaveTransition { destination_vertical: bool },
}

/// Velocity parked in the panel's local frame while the body is frozen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FreezeCache {
    local_velocity: Option<Vec2>,
}

impl FreezeCache {
    pub fn is_frozen(&self) -> bool {
        self.local_velocity.is_some()
    }

    pub fn cached_velocity(&self) -> Option<Vec2> {
        self.local_velocity
    }

    pub(crate) fn freeze(&mut self, body: &mut dyn CharacterBody, panel_rotation: Quat) {
        if self.is_frozen() {
            return;
        }
        self.local_velocity = Some(to_local(panel_rotation, body.velocity()));
        body.set_velocity(Vec2::ZERO);
        body.set_gravity_enabled(false);
        body.sleep();
    }

    pub(crate) fn unfreeze(&mut self, body: &mut dyn CharacterBody, panel_rotation: Quat) {
        let Some(local) = self.local_velocity.take() else {
            return;
        };
        body.wake();
        body.set_gravity_enabled(true);
        body.set_velocity(to_world(panel_rotation, local));
    }
}

pub(crate) fn enter(
    state: PlayerState,
    freeze: &mut FreezeCache,
    ctx: &mut PlayerContext<'_>,
) {
    match state {
        PlayerState::FreeMovement => {
            ctx.presentation.set_animator_flag(ANIM_FREE_MOVEMENT, true);
        }
        PlayerState::TransitionMovement => {
            ctx.body.set_velocity(Vec2::ZERO);
            ctx.body.set_gravity_enabled(false);
            ctx.body.sleep();
            ctx.presentation.set_animator_flag(ANIM_FREE_MOVEMENT, true);
        }
        PlayerState::LadderMovement => {
            ctx.body.set_velocity(Vec2::ZERO);
            ctx.body.set_gravity_enabled(false);
            ctx.presentation.set_animator_flag(ANIM_LADDER_MOVEMENT, true);
        }
        PlayerState::PanelEditFreeze | PlayerState::PausedGameFreeze => {
            freeze.freeze(ctx.body, ctx.panel_rotation);
        }
    }
}

pub(crate) fn exit(
    state: PlayerState,
    next: PlayerState,
    freeze: &mut FreezeCache,
    ctx: &mut PlayerContext<'_>,
) {
    match state {
        PlayerState::FreeMovement => {
            ctx.presentation.set_animator_flag(ANIM_FREE_MOVEMENT, false);
        }
        PlayerState::TransitionMovement => {
            ctx.body.set_gravity_enabled(true);
            ctx.body.wake();
            ctx.presentation.set_animator_flag(ANIM_FREE_MOVEMENT, false);
            if !matches!(
                next,
                PlayerState::PausedGameFreeze | PlayerState::TransitionMovement
            ) {
                discard_path(ctx);
            }
        }
        PlayerState::LadderMovement => {
            ctx.body.set_gravity_enabled(true);
            ctx.presentation.set_animator_flag(ANIM_LADDER_MOVEMENT, false);
        }
        PlayerState::PanelEditFreeze => {
            freeze.unfreeze(ctx.body, ctx.panel_rotation);
        }
        PlayerState::PausedGameFreeze => {
            freeze.unfreeze(ctx.body, ctx.panel_rotation);
            // A transition paused mid-path only survives a resume.
            if next != PlayerState::TransitionMovement {
                discard_path(ctx);
            }
        }
    }
}

/// Per-frame hook of the current state.
pub(crate) fn execute(
    state: PlayerState,
    frame: &FrameInput,
    ctx: &mut PlayerContext<'_>,
) -> Option<FollowUp> {
    match state {
        PlayerState::FreeMovement => {
            free_movement(frame, ctx);
            None
        }
        PlayerState::LadderMovement => ladder_movement(frame, ctx),
        PlayerState::TransitionMovement => transition_movement(frame, ctx),
        // Frozen states have nothing to do per frame.
        PlayerState::PanelEditFreeze | PlayerState::PausedGameFreeze => None,
    }
}

fn free_movement(frame: &FrameInput, ctx: &mut PlayerContext<'_>) {
    let rotation = ctx.panel_rotation;
    let mut local = to_local(rotation, ctx.body.velocity());

    local.x = frame.axis.x * ctx.tuning.move_speed;
    if frame.jump_pressed && frame.grounded {
        local.y = ctx.tuning.jump_velocity;
        ctx.presentation.trigger_animation(ANIM_JUMP);
    }
    local.y = local.y.max(-ctx.tuning.max_fall_speed);

    ctx.body.set_velocity(to_world(rotation, local));
    ctx.body.set_rotation(rotation);
    ctx.presentation.set_animator_flag(ANIM_GROUNDED, frame.grounded);
}

fn ladder_movement(frame: &FrameInput, ctx: &mut PlayerContext<'_>) -> Option<FollowUp> {
    if frame.jump_pressed {
        return Some(FollowUp::Change {
            state: PlayerState::FreeMovement,
            force: false,
        });
    }

    let local = Vec2::new(0.0, frame.axis.y * ctx.tuning.ladder_speed);
    ctx.body.set_velocity(to_world(ctx.panel_rotation, local));
    ctx.body.set_rotation(ctx.panel_rotation);
    None
}

fn transition_movement(frame: &FrameInput, ctx: &mut PlayerContext<'_>) -> Option<FollowUp> {
    match ctx.transition.advance(frame.axis, frame.delta_secs) {
        TransitionStep::Idle => {
            error!("TransitionMovement is active without a transition path");
            Some(FollowUp::LeaveTransition {
                destination_vertical: false,
            })
        }
        TransitionStep::Moved { position, rotation } => {
            ctx.body.set_translation(position);
            ctx.body.set_rotation(rotation);
            None
        }
        TransitionStep::NodeReached {
            node,
            door,
            panel,
            visible,
        } => {
            debug!(
                "Transition reached node {} of {} (panel {}, visible={})",
                node, door, panel, visible
            );
            ctx.presentation.set_visible(visible);
            if let Some(previous) = ctx.active_panel.set(panel) {
                ctx.notifications.push(StateNotification::PanelChanged {
                    previous,
                    current: panel,
                });
            }
            None
        }
        TransitionStep::Finished {
            destination,
            destination_vertical,
        } => {
            info!(
                "Transition arrived at {} (vertical={})",
                destination, destination_vertical
            );
            Some(FollowUp::LeaveTransition {
                destination_vertical,
            })
        }
    }
}

fn discard_path(ctx: &mut PlayerContext<'_>) {
    if !ctx.transition.is_active() {
        return;
    }
    if !ctx.transition.is_visible() {
        ctx.presentation.set_visible(true);
    }
    ctx.transition.clear();
}
