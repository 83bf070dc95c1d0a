//! Movement domain: narrow interfaces to the physics body and the renderer,
//! plus their ECS-backed implementations.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::components::{PlayerAnimator, PlayerMotion};

pub const ANIM_FREE_MOVEMENT: &str = "FreeMovement";
pub const ANIM_LADDER_MOVEMENT: &str = "LadderMovement";
pub const ANIM_GROUNDED: &str = "Grounded";
pub const ANIM_JUMP: &str = "Jump";

/// Physics body the state handlers drive.
pub trait CharacterBody {
    fn translation(&self) -> Vec3;
    fn set_translation(&mut self, translation: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_gravity_enabled(&mut self, enabled: bool);
    fn sleep(&mut self);
    fn wake(&mut self);
}

/// Render-side flags. Write-only from the movement core.
pub trait CharacterPresentation {
    fn set_visible(&mut self, visible: bool);
    fn set_animator_flag(&mut self, name: &'static str, value: bool);
    fn trigger_animation(&mut self, name: &'static str);
}

/// Borrowed view over the player's physics components.
pub struct PlayerBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub rigid_body: &'a mut RigidBody,
    pub motion: &'a mut PlayerMotion,
}

impl CharacterBody for PlayerBody<'_> {
    fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_translation(&mut self, translation: Vec3) {
        self.transform.translation = translation;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.motion.gravity_enabled = enabled;
    }

    fn sleep(&mut self) {
        // Kinematic bodies ignore contacts and keep the zeroed velocity.
        self.velocity.0 = Vec2::ZERO;
        *self.rigid_body = RigidBody::Kinematic;
        self.motion.asleep = true;
    }

    fn wake(&mut self) {
        *self.rigid_body = RigidBody::Dynamic;
        self.motion.asleep = false;
    }
}

/// Borrowed view over the player's visibility and animator.
pub struct PlayerPresentation<'a> {
    pub visibility: &'a mut Visibility,
    pub animator: &'a mut PlayerAnimator,
}

impl CharacterPresentation for PlayerPresentation<'_> {
    fn set_visible(&mut self, visible: bool) {
        *self.visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    fn set_animator_flag(&mut self, name: &'static str, value: bool) {
        self.animator.flags.insert(name, value);
    }

    fn trigger_animation(&mut self, name: &'static str) {
        self.animator.last_trigger = Some(name);
    }
}

/// Express a world-space planar vector in the frame of `rotation`.
pub fn to_local(rotation: Quat, world: Vec2) -> Vec2 {
    (rotation.inverse() * world.extend(0.0)).truncate()
}

/// Inverse of [`to_local`].
pub fn to_world(rotation: Quat, local: Vec2) -> Vec2 {
    (rotation * local.extend(0.0)).truncate()
}
