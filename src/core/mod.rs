//! Core domain: app-wide setup shared by every other domain.

mod systems;

use bevy::prelude::*;

use crate::core::systems::setup_camera;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)))
            .add_systems(Startup, setup_camera);
    }
}
