//! Core domain: camera bootstrap.

use bevy::prelude::*;

pub(crate) fn setup_camera(mut commands: Commands) {
    // Centered on the demo puzzle, zoomed out enough to show the upper panel.
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 150.0, 0.0).with_scale(Vec3::splat(1.25)),
    ));
}
