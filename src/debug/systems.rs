//! Debug domain: hotkeys, the info overlay, and door gizmos.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::movement::{
    ANIM_FREE_MOVEMENT, ANIM_LADDER_MOVEMENT, Player, PlayerAnimator, PlayerState,
    PlayerStateMachine, PlayerStateRequest,
};
use crate::panels::{
    ActivePanel, ActivePanelChanged, DoorConnections, DoorIndex, Panel, PanelEnableRequest,
    PanelId, PuzzleArea, active_panel_rotation,
};
use crate::transition::PanelTransition;

/// Marker for the debug info overlay text
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

/// F1 toggles the info overlay and door gizmos.
pub(crate) fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
        info!(
            "[DEBUG] Overlay {}",
            if debug_state.show_info { "on" } else { "off" }
        );
    }
}

/// F2 resets to the puzzle start, F3 forces free movement, F4 toggles the
/// panel after the active one.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    puzzle: Option<Res<PuzzleArea>>,
    active_panel: Res<ActivePanel>,
    panels: Query<&Panel>,
    mut debug_state: ResMut<DebugState>,
    mut requests: MessageWriter<PlayerStateRequest>,
    mut enable_requests: MessageWriter<PanelEnableRequest>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        requests.write(PlayerStateRequest::Change {
            state: PlayerState::FreeMovement,
            force: true,
        });
        debug_state.pending_reset = true;
        debug_state.set_message("Reset to puzzle start", 2.0);
        info!("[DEBUG] Reset to puzzle start");
    }

    if keyboard.just_pressed(KeyCode::F3) {
        requests.write(PlayerStateRequest::Change {
            state: PlayerState::FreeMovement,
            force: true,
        });
        debug_state.set_message("Forced FreeMovement", 2.0);
        info!("[DEBUG] Forced FreeMovement");
    }

    if keyboard.just_pressed(KeyCode::F4) {
        let Some(puzzle) = puzzle else {
            return;
        };
        let Some(panel_id) = next_panel(&puzzle, &active_panel) else {
            return;
        };
        let Some(panel) = panels.iter().find(|panel| panel.id == panel_id) else {
            return;
        };

        let enabled = !panel.enabled;
        enable_requests.write(PanelEnableRequest {
            panel: panel_id,
            enabled,
        });
        debug_state.set_message(
            format!("{} {}", panel_id, if enabled { "enabled" } else { "disabled" }),
            2.0,
        );
    }
}

/// Panel after the active one in puzzle order, wrapping around.
pub(crate) fn next_panel(puzzle: &PuzzleArea, active: &ActivePanel) -> Option<PanelId> {
    let current = active.current?;
    let index = puzzle.panels.iter().position(|panel| *panel == current)?;
    puzzle
        .panels
        .get((index + 1) % puzzle.panels.len())
        .copied()
        .filter(|panel| *panel != current)
}

/// Teleport once the forced free state from F2 has been applied.
pub(crate) fn apply_pending_reset(
    machine: Res<PlayerStateMachine>,
    puzzle: Option<Res<PuzzleArea>>,
    panels: Query<(&Panel, &GlobalTransform)>,
    mut debug_state: ResMut<DebugState>,
    mut active_panel: ResMut<ActivePanel>,
    mut panel_events: MessageWriter<ActivePanelChanged>,
    mut player: Query<(&mut Transform, &mut LinearVelocity), With<Player>>,
) {
    if !debug_state.pending_reset || machine.current() != PlayerState::FreeMovement {
        return;
    }
    debug_state.pending_reset = false;

    let Some(puzzle) = puzzle else {
        warn!("[DEBUG] No puzzle area to reset into");
        return;
    };
    if let Some(start) = puzzle.starting_panel() {
        if let Some(previous) = active_panel.set(start) {
            panel_events.write(ActivePanelChanged {
                previous,
                current: start,
            });
        }
    }

    let rotation = active_panel_rotation(&active_panel, &panels);
    for (mut transform, mut velocity) in &mut player {
        transform.translation = puzzle.spawn_point;
        transform.rotation = rotation;
        velocity.0 = Vec2::ZERO;
    }
}

pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    debug_state.tick_message(time.delta_secs());
}

/// Game state shown in the info overlay.
#[derive(SystemParam)]
pub(crate) struct OverlaySources<'w> {
    machine: Res<'w, PlayerStateMachine>,
    active_panel: Res<'w, ActivePanel>,
    connections: Res<'w, DoorConnections>,
    transition: Res<'w, PanelTransition>,
}

/// Update the debug info overlay with the current movement state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    sources: OverlaySources,
    player_query: Query<(&Transform, &PlayerAnimator), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let (Some((transform, animator)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    else {
        return;
    };

    let pos = transform.translation;
    let OverlaySources {
        machine,
        active_panel,
        connections,
        transition,
    } = sources;
    let panel = active_panel
        .current
        .map(|panel| panel.to_string())
        .unwrap_or_else(|| "none".to_string());
    let links = connections
        .pairs()
        .iter()
        .map(|(a, b)| format!("{}<->{}", a.0, b.0))
        .collect::<Vec<_>>()
        .join(" ");
    let mut lines = vec![
        format!("Pos: ({:.0}, {:.0})", pos.x, pos.y),
        format!("State: {} (prev {})", machine.current(), machine.previous()),
        format!("Frozen: {}", machine.is_frozen()),
        format!(
            "Anim: free={} ladder={}",
            animator.flag(ANIM_FREE_MOVEMENT),
            animator.flag(ANIM_LADDER_MOVEMENT)
        ),
        format!("Active: {}", panel),
        format!("Connections: {}", links),
    ];
    if transition.is_active() {
        lines.push(format!(
            "Transition: {}->{} @ {:.2} x{:.1}",
            transition.previous_node(),
            transition.next_node(),
            transition.progress(),
            transition.speed_multiplier()
        ));
    }
    if let Some((message, _)) = &debug_state.status_message {
        lines.push(message.clone());
    }
    **text = lines.join("\n");
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("..."),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.9, 0.95)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ZIndex(500),
    ));
}

/// Door anchors, committed connections, and the live transition path.
pub(crate) fn draw_door_overlay(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    index: Res<DoorIndex>,
    connections: Res<DoorConnections>,
    transition: Res<PanelTransition>,
) {
    if !debug_state.show_info {
        return;
    }

    for (a, b) in connections.pairs() {
        for door in [a, b] {
            if let Some(pose) = index.get(door) {
                gizmos.line(
                    pose.inside.position,
                    pose.outside.position,
                    Color::srgb(0.4, 0.8, 1.0),
                );
            }
        }
    }

    if let Some(path) = transition.path() {
        for pair in path.nodes().windows(2) {
            gizmos.line(
                pair[0].position,
                pair[1].position,
                Color::srgb(1.0, 0.5, 0.9),
            );
        }
    }
}
