//! Movement domain: components and physics layers for the player character.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::collections::HashMap;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Door triggers - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Physics-side state of the player that the state handlers drive through
/// [`crate::movement::CharacterBody`]. Gravity is integrated manually along
/// the active panel's down vector, so it lives here rather than on avian's
/// `GravityScale`.
#[derive(Component, Debug)]
pub struct PlayerMotion {
    pub on_ground: bool,
    pub gravity_enabled: bool,
    pub asleep: bool,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self {
            on_ground: false,
            gravity_enabled: true,
            asleep: false,
        }
    }
}

/// Animator parameters written by the state handlers. The sprite layer reads
/// these; the movement core only ever writes them.
#[derive(Component, Debug, Default)]
pub struct PlayerAnimator {
    pub flags: HashMap<&'static str, bool>,
    pub last_trigger: Option<&'static str>,
}

impl PlayerAnimator {
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

/// Player position in the active panel's local frame, captured when the
/// body freezes so edit-mode panel rotation carries the player along.
#[derive(Component, Debug, Default)]
pub struct FrozenOffset(pub Option<Vec3>);
