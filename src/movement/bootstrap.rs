//! Movement domain: player spawning at the puzzle start.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{FrozenOffset, GameLayer, Player, PlayerAnimator, PlayerMotion};
use crate::panels::{ActivePanel, PuzzleArea};

pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

/// Spawn the player on the puzzle's starting panel.
pub(crate) fn spawn_player(
    mut commands: Commands,
    puzzle: Option<Res<PuzzleArea>>,
    mut active_panel: ResMut<ActivePanel>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let Some(puzzle) = puzzle else {
        warn!("No PuzzleArea registered, spawning player at the origin");
        commands.spawn(player_bundle(Vec3::ZERO));
        return;
    };

    if let Some(panel) = puzzle.starting_panel() {
        active_panel.set(panel);
    }
    info!(
        "Spawning player at {:?} on {:?}",
        puzzle.spawn_point,
        puzzle.starting_panel()
    );
    commands.spawn(player_bundle(puzzle.spawn_point));
}

fn player_bundle(position: Vec3) -> impl Bundle {
    (
        // Identity & Movement
        (
            Player,
            PlayerMotion::default(),
            PlayerAnimator::default(),
            FrozenOffset::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(position),
        Visibility::default(),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity follows the active panel, applied manually
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
            ),
        ),
    )
}
