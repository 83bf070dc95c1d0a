mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod movement;
mod panels;
mod ports;
mod transition;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Panelwalk".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        content::ContentPlugin::default(),
        core::CorePlugin,
        panels::PanelsPlugin,
        transition::TransitionPlugin,
        movement::MovementPlugin,
        ports::PortsPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
