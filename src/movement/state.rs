//! Movement domain: the closed set of player movement modes and their guards.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PlayerState {
    #[default]
    FreeMovement,
    TransitionMovement,
    PanelEditFreeze,
    LadderMovement,
    PausedGameFreeze,
}

impl PlayerState {
    pub const ALL: [PlayerState; 5] = [
        PlayerState::FreeMovement,
        PlayerState::TransitionMovement,
        PlayerState::PanelEditFreeze,
        PlayerState::LadderMovement,
        PlayerState::PausedGameFreeze,
    ];

    /// Entry guard of this state, evaluated against the current one.
    /// `frozen` is whether the character currently holds a freeze cache.
    pub fn can_enter_from(self, current: PlayerState, frozen: bool) -> bool {
        match self {
            PlayerState::FreeMovement | PlayerState::PausedGameFreeze => true,
            PlayerState::LadderMovement => current != PlayerState::TransitionMovement,
            PlayerState::TransitionMovement => !matches!(
                current,
                PlayerState::PanelEditFreeze | PlayerState::TransitionMovement
            ),
            PlayerState::PanelEditFreeze => {
                current != PlayerState::TransitionMovement && !frozen
            }
        }
    }

    /// States that park the body until they are left.
    pub fn freezes_body(self) -> bool {
        matches!(
            self,
            PlayerState::PanelEditFreeze | PlayerState::PausedGameFreeze
        )
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerState::FreeMovement => "FreeMovement",
            PlayerState::TransitionMovement => "TransitionMovement",
            PlayerState::PanelEditFreeze => "PanelEditFreeze",
            PlayerState::LadderMovement => "LadderMovement",
            PlayerState::PausedGameFreeze => "PausedGameFreeze",
        };
        f.write_str(name)
    }
}
