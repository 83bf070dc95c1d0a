//! Movement domain: sampled input.

use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub freeze_just_pressed: bool,
    pub pause_just_pressed: bool,
    /// -1 / 0 / +1 while a panel rotate key is held.
    pub rotate: f32,
}
