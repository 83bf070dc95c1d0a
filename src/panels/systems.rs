//! Panels domain: door indexing, door triggers, cooldown, and panel toggling.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::content::{MovementTuning, TransitionTuning};
use crate::movement::{
    MovementInput, Player, PlayerState, PlayerStateExited, PlayerStateMachine, PlayerStateRequest,
};
use crate::panels::components::{Door, DoorId, DoorTrigger, Panel, PanelGeometry};
use crate::panels::events::PanelEnableRequest;
use crate::panels::graph::{DoorConnections, TransitionCooldown, door_entry_allowed};
use crate::panels::registry::{DoorIndex, DoorPose};
use crate::panels::resources::ActivePanel;
use crate::transition::PanelTransition;

/// World transform of the active panel, if it exists.
pub fn active_panel_transform(
    active: &ActivePanel,
    panels: &Query<(&Panel, &GlobalTransform)>,
) -> Option<GlobalTransform> {
    let current = active.current?;
    panels
        .iter()
        .find(|(panel, _)| panel.id == current)
        .map(|(_, transform)| *transform)
}

/// Rotation of the active panel; identity when there is none.
pub fn active_panel_rotation(
    active: &ActivePanel,
    panels: &Query<(&Panel, &GlobalTransform)>,
) -> Quat {
    active_panel_transform(active, panels)
        .map(|transform| transform.rotation())
        .unwrap_or(Quat::IDENTITY)
}

/// Rebuild door world poses so rotated panels are reflected.
pub(crate) fn sync_door_index(
    mut index: ResMut<DoorIndex>,
    doors: Query<(&Door, &GlobalTransform)>,
) {
    index.clear();
    for (door, transform) in &doors {
        index.insert(DoorPose::from_door(door, transform));
    }
}

pub(crate) fn tick_transition_cooldown(mut cooldown: ResMut<TransitionCooldown>, time: Res<Time>) {
    cooldown.tick(time.delta());
}

/// Door triggers stay quiet for a moment after a transition drops the
/// player next to one.
pub(crate) fn start_exit_cooldown(
    mut exited: MessageReader<PlayerStateExited>,
    tuning: Res<TransitionTuning>,
    mut cooldown: ResMut<TransitionCooldown>,
) {
    for event in exited.read() {
        if event.state == PlayerState::TransitionMovement
            && event.next != PlayerState::PausedGameFreeze
        {
            cooldown.restart(tuning.exit_cooldown);
            debug!(
                "[TRANSITION] Exit cooldown started ({:.2}s)",
                tuning.exit_cooldown
            );
        }
    }
}

/// What decides whether a touched door may be entered.
#[derive(SystemParam)]
pub(crate) struct DoorEntryGate<'w> {
    connections: Res<'w, DoorConnections>,
    cooldown: Res<'w, TransitionCooldown>,
    machine: Res<'w, PlayerStateMachine>,
}

impl DoorEntryGate<'_> {
    fn allows(&self, door: DoorId) -> bool {
        door_entry_allowed(
            self.connections.is_opened(door),
            self.cooldown.can_transition(),
            self.machine.current(),
        )
    }
}

/// Walking into an opened door's trigger starts a transition through it.
pub(crate) fn detect_door_entry(
    mut collision_start_events: MessageReader<CollisionStart>,
    triggers: Query<&DoorTrigger>,
    player_query: Query<Entity, With<Player>>,
    gate: DoorEntryGate,
    mut transition: ResMut<PanelTransition>,
    mut requests: MessageWriter<PlayerStateRequest>,
) {
    let Some(player_entity) = player_query.iter().next() else {
        // Consume events if no player
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let (trigger, other) = if let Ok(trigger) = triggers.get(event.collider1) {
            (trigger, event.collider2)
        } else if let Ok(trigger) = triggers.get(event.collider2) {
            (trigger, event.collider1)
        } else {
            continue;
        };

        if other != player_entity {
            continue;
        }

        let door = trigger.door;
        if !gate.allows(door) {
            debug!(
                "[TRANSITION] Ignoring {} (opened={}, cooldown ready={}, state={})",
                door,
                gate.connections.is_opened(door),
                gate.cooldown.can_transition(),
                gate.machine.current()
            );
            continue;
        }

        info!("[TRANSITION] Player entered {}", door);
        transition.door_entered(door);
        requests.write(PlayerStateRequest::change(PlayerState::TransitionMovement));
    }
}

/// Show/hide a panel and switch its colliders as one unit.
pub(crate) fn apply_panel_enable(
    mut commands: Commands,
    mut requests: MessageReader<PanelEnableRequest>,
    mut panels: Query<(&mut Panel, &mut Visibility)>,
    geometry: Query<(Entity, &PanelGeometry)>,
) {
    for request in requests.read() {
        let mut found = false;
        for (mut panel, mut visibility) in &mut panels {
            if panel.id != request.panel {
                continue;
            }
            found = true;
            panel.enabled = request.enabled;
            *visibility = if request.enabled {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        if !found {
            warn!("PanelEnableRequest for unknown {}", request.panel);
            continue;
        }

        for (entity, owner) in &geometry {
            if owner.panel != request.panel {
                continue;
            }
            if request.enabled {
                commands.entity(entity).remove::<ColliderDisabled>();
            } else {
                commands.entity(entity).insert(ColliderDisabled);
            }
        }

        info!(
            "{} {}",
            request.panel,
            if request.enabled { "enabled" } else { "disabled" }
        );
    }
}

/// While editing, the rotate keys turn the active panel about its origin.
pub(crate) fn rotate_active_panel(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    machine: Res<PlayerStateMachine>,
    active_panel: Res<ActivePanel>,
    mut panels: Query<(&Panel, &mut Transform)>,
) {
    if machine.current() != PlayerState::PanelEditFreeze || input.rotate == 0.0 {
        return;
    }
    let Some(current) = active_panel.current else {
        return;
    };

    let angle = input.rotate * tuning.panel_rotate_speed.to_radians() * time.delta_secs();
    for (panel, mut transform) in &mut panels {
        if panel.id == current {
            transform.rotate_z(angle);
        }
    }
}
