//! Movement domain: the player state machine.
//!
//! Requests are evaluated against the target state's guard; an accepted
//! request runs `exit(old)`, swaps current/previous, then runs `enter(new)`,
//! all inside the call. `execute` is the only per-frame hook.

use bevy::prelude::*;

use crate::content::MovementTuning;
use crate::movement::body::{CharacterBody, CharacterPresentation};
use crate::movement::events::PlayerStateRequest;
use crate::movement::handlers::{self, FollowUp, FreezeCache};
use crate::movement::state::PlayerState;
use crate::panels::{ActivePanel, DoorConnections, DoorIndex, PanelId};
use crate::transition::PanelTransition;

/// Input sampled once at the top of the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub grounded: bool,
    pub delta_secs: f32,
}

/// Side effects the ECS layer turns into messages after the machine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateNotification {
    Exited {
        state: PlayerState,
        next: PlayerState,
    },
    Entered {
        state: PlayerState,
        previous: PlayerState,
    },
    PanelChanged {
        previous: Option<PanelId>,
        current: PanelId,
    },
}

/// Everything a handler may touch, borrowed for the duration of one call.
pub struct PlayerContext<'a> {
    pub body: &'a mut dyn CharacterBody,
    pub presentation: &'a mut dyn CharacterPresentation,
    pub transition: &'a mut PanelTransition,
    pub doors: &'a DoorIndex,
    pub connections: &'a DoorConnections,
    pub active_panel: &'a mut ActivePanel,
    pub tuning: &'a MovementTuning,
    /// World rotation of the active panel.
    pub panel_rotation: Quat,
    pub notifications: &'a mut Vec<StateNotification>,
}

#[derive(Resource, Debug, Default)]
pub struct PlayerStateMachine {
    current: PlayerState,
    previous: PlayerState,
    /// Last non-freeze state, the one a chain of freezes returns to.
    resume_to: PlayerState,
    freeze: FreezeCache,
}

impl PlayerStateMachine {
    pub fn current(&self) -> PlayerState {
        self.current
    }

    pub fn previous(&self) -> PlayerState {
        self.previous
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_frozen()
    }

    pub fn freeze_cache(&self) -> &FreezeCache {
        &self.freeze
    }

    pub fn resume_to(&self) -> PlayerState {
        self.resume_to
    }

    /// Apply one queued request.
    pub fn apply(&mut self, request: PlayerStateRequest, ctx: &mut PlayerContext<'_>) -> bool {
        match request {
            PlayerStateRequest::Change { state, force } => {
                self.change_state_request(state, force, ctx)
            }
            PlayerStateRequest::RestoreLast { force } => {
                self.restore_last_state_request(force, ctx)
            }
            PlayerStateRequest::LeaveFreeze => self.leave_freeze_request(ctx),
        }
    }

    /// Move to `new` if its guard accepts the current state, or
    /// unconditionally when `force` is set. Returns whether the change
    /// happened; a rejection leaves everything untouched.
    pub fn change_state_request(
        &mut self,
        new: PlayerState,
        force: bool,
        ctx: &mut PlayerContext<'_>,
    ) -> bool {
        if !force && !new.can_enter_from(self.current, self.freeze.is_frozen()) {
            debug!("Rejected state change {} -> {}", self.current, new);
            return false;
        }

        if new == PlayerState::TransitionMovement {
            let resuming =
                self.current == PlayerState::PausedGameFreeze && ctx.transition.is_active();
            if !resuming {
                let character = ctx.body.translation();
                if let Err(err) = ctx.transition.begin(ctx.doors, ctx.connections, character) {
                    error!("Cannot enter {}: {}", new, err);
                    return false;
                }
            }
        }

        let old = self.current;
        handlers::exit(old, new, &mut self.freeze, ctx);
        self.previous = old;
        self.current = new;
        if new.freezes_body() && !old.freezes_body() {
            self.resume_to = old;
        }
        handlers::enter(new, &mut self.freeze, ctx);

        ctx.notifications.push(StateNotification::Exited {
            state: old,
            next: new,
        });
        ctx.notifications.push(StateNotification::Entered {
            state: new,
            previous: old,
        });
        info!("Player state {} -> {}", old, new);
        true
    }

    /// Re-request the previous state.
    pub fn restore_last_state_request(&mut self, force: bool, ctx: &mut PlayerContext<'_>) -> bool {
        self.change_state_request(self.previous, force, ctx)
    }

    /// Leave the current freeze. Unpausing returns to edit mode when the
    /// pause interrupted it; otherwise the state active before the first
    /// freeze is resumed, falling back to free movement.
    pub fn leave_freeze_request(&mut self, ctx: &mut PlayerContext<'_>) -> bool {
        let target = match (self.current, self.previous) {
            (PlayerState::PausedGameFreeze, PlayerState::PanelEditFreeze) => {
                PlayerState::PanelEditFreeze
            }
            (current, _) if current.freezes_body() => self.resume_to,
            _ => return false,
        };

        if self.change_state_request(target, true, ctx) {
            return true;
        }
        self.change_state_request(PlayerState::FreeMovement, true, ctx)
    }

    /// Run the current handler for one frame, then apply whatever it asked for.
    pub fn execute(&mut self, frame: &FrameInput, ctx: &mut PlayerContext<'_>) {
        let Some(follow_up) = handlers::execute(self.current, frame, ctx) else {
            return;
        };

        match follow_up {
            FollowUp::Change { state, force } => {
                self.change_state_request(state, force, ctx);
            }
            FollowUp::LeaveTransition {
                destination_vertical,
            } => self.leave_transition(destination_vertical, ctx),
        }
    }

    fn leave_transition(&mut self, destination_vertical: bool, ctx: &mut PlayerContext<'_>) {
        if destination_vertical {
            self.change_state_request(PlayerState::LadderMovement, true, ctx);
            return;
        }

        // After a pause/resume the previous state is the pause itself.
        let restored = !self.previous.freezes_body() && self.restore_last_state_request(false, ctx);
        if !restored {
            self.change_state_request(PlayerState::FreeMovement, false, ctx);
        }
    }
}
