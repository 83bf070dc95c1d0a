//! Panels domain: demo puzzle area spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::GameLayer;
use crate::panels::components::{
    Door, DoorId, DoorTrigger, Ground, Panel, PanelGeometry, PanelId, Wall,
};
use crate::panels::graph::DoorConnections;
use crate::panels::resources::{ActivePanel, PuzzleArea};
use crate::ports::PortHandle;

const PANEL_HALF_SIZE: Vec2 = Vec2::new(150.0, 120.0);
const FLOOR_THICKNESS: f32 = 20.0;

struct DoorLayout {
    id: u32,
    local: Vec2,
    outside: Vec2,
    is_horizontal: bool,
    goes_right: bool,
}

struct PanelLayout {
    id: u32,
    position: Vec2,
    color: Color,
    wall_color: Color,
    doors: Vec<DoorLayout>,
}

/// Two side-by-side panels joined by a horizontal door pair, and a third
/// panel above the second reached through a vertical (ladder) door pair
/// that starts unconnected.
fn demo_layout() -> Vec<PanelLayout> {
    vec![
        PanelLayout {
            id: 1,
            position: Vec2::new(-250.0, 0.0),
            color: Color::srgb(0.35, 0.4, 0.35),
            wall_color: Color::srgb(0.25, 0.3, 0.25),
            doors: vec![DoorLayout {
                id: 1,
                local: Vec2::new(110.0, -70.0),
                outside: Vec2::new(60.0, 0.0),
                is_horizontal: true,
                goes_right: true,
            }],
        },
        PanelLayout {
            id: 2,
            position: Vec2::new(250.0, 0.0),
            color: Color::srgb(0.35, 0.35, 0.45),
            wall_color: Color::srgb(0.25, 0.25, 0.35),
            doors: vec![
                DoorLayout {
                    id: 2,
                    local: Vec2::new(-110.0, -70.0),
                    outside: Vec2::new(-60.0, 0.0),
                    is_horizontal: true,
                    goes_right: false,
                },
                DoorLayout {
                    id: 3,
                    local: Vec2::new(60.0, 0.0),
                    outside: Vec2::new(0.0, 150.0),
                    is_horizontal: false,
                    goes_right: true,
                },
            ],
        },
        PanelLayout {
            id: 3,
            position: Vec2::new(250.0, 400.0),
            color: Color::srgb(0.45, 0.38, 0.3),
            wall_color: Color::srgb(0.35, 0.28, 0.2),
            doors: vec![DoorLayout {
                id: 4,
                local: Vec2::new(60.0, -40.0),
                outside: Vec2::new(0.0, -150.0),
                is_horizontal: false,
                goes_right: false,
            }],
        },
    ]
}

pub(crate) fn spawn_puzzle_area(
    mut commands: Commands,
    mut connections: ResMut<DoorConnections>,
    mut active_panel: ResMut<ActivePanel>,
) {
    let layout = demo_layout();

    for panel in &layout {
        spawn_panel(&mut commands, panel);
    }

    if let Err(err) = connections.connect(DoorId(1), DoorId(2)) {
        error!("Demo connection failed: {}", err);
    }

    let puzzle = PuzzleArea {
        panels: layout.iter().map(|panel| PanelId(panel.id)).collect(),
        spawn_point: Vec3::new(-300.0, -60.0, 0.0),
    };
    if let Some(start) = puzzle.starting_panel() {
        active_panel.set(start);
    }

    info!(
        "Spawned puzzle area: {} panels, {} connection(s)",
        layout.len(),
        connections.len()
    );
    commands.insert_resource(puzzle);
}

fn spawn_panel(commands: &mut Commands, layout: &PanelLayout) {
    let id = PanelId(layout.id);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    commands
        .spawn((
            Panel::new(id),
            Transform::from_translation(layout.position.extend(0.0)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            // Floor
            parent.spawn((
                Ground,
                PanelGeometry { panel: id },
                Sprite {
                    color: layout.color,
                    custom_size: Some(Vec2::new(PANEL_HALF_SIZE.x * 2.0, FLOOR_THICKNESS)),
                    ..default()
                },
                Transform::from_xyz(0.0, -PANEL_HALF_SIZE.y + FLOOR_THICKNESS / 2.0, 0.0),
                RigidBody::Static,
                Collider::rectangle(PANEL_HALF_SIZE.x * 2.0, FLOOR_THICKNESS),
                ground_layers,
            ));

            // Side walls
            for side in [-1.0, 1.0] {
                parent.spawn((
                    Wall,
                    PanelGeometry { panel: id },
                    Sprite {
                        color: layout.wall_color,
                        custom_size: Some(Vec2::new(FLOOR_THICKNESS, PANEL_HALF_SIZE.y * 2.0)),
                        ..default()
                    },
                    Transform::from_xyz(side * PANEL_HALF_SIZE.x, 0.0, 0.0),
                    RigidBody::Static,
                    Collider::rectangle(FLOOR_THICKNESS, PANEL_HALF_SIZE.y * 2.0),
                    wall_layers,
                ));
            }

            for door in &layout.doors {
                spawn_door(parent, id, door);
            }
        });
}

fn spawn_door(parent: &mut ChildSpawnerCommands, panel: PanelId, layout: &DoorLayout) {
    let id = DoorId(layout.id);
    let trigger_size = if layout.is_horizontal {
        Vec2::new(30.0, 60.0)
    } else {
        Vec2::new(40.0, 60.0)
    };

    parent
        .spawn((
            Door {
                id,
                panel,
                is_horizontal: layout.is_horizontal,
                goes_right: layout.goes_right,
                inside_offset: Vec3::ZERO,
                outside_offset: layout.outside.extend(0.0),
            },
            Sprite {
                color: Color::srgba(0.4, 0.6, 0.9, 0.5),
                custom_size: Some(trigger_size),
                ..default()
            },
            Transform::from_translation(layout.local.extend(0.0)),
        ))
        .with_children(|door| {
            // Door sensor
            door.spawn((
                DoorTrigger { door: id },
                Transform::default(),
                Collider::rectangle(trigger_size.x, trigger_size.y),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
            ));

            // Connection plug at the outside anchor
            door.spawn((
                PortHandle {
                    door: id,
                    goes_right: layout.goes_right,
                },
                Sprite {
                    color: Color::srgb(0.8, 0.8, 0.3),
                    custom_size: Some(Vec2::splat(16.0)),
                    ..default()
                },
                Transform::from_translation(layout.outside.extend(1.0)),
            ));
        });
}
