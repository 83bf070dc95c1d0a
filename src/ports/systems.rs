//! Ports domain: pointer sampling, drag gestures, and connection feedback.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::HashMap;

use crate::content::PortTuning;
use crate::movement::{PlayerState, PlayerStateMachine};
use crate::panels::{DoorConnections, DoorId, DoorIndex, DoorsConnected, DoorsDisconnected};
use crate::ports::components::PortHandle;
use crate::ports::editor::{
    ConnectionPorts, EditOutcome, PlugSprite, angle_within_limit, candidate_angle_ok,
};
use crate::ports::resources::{PointerRay, PortPointer};

const PLUG_REST_COLOR: Color = Color::srgb(0.8, 0.8, 0.3);
const PLUG_LEFT_COLOR: Color = Color::srgb(0.95, 0.55, 0.2);
const PLUG_RIGHT_COLOR: Color = Color::srgb(0.3, 0.75, 0.95);
const LINE_IDLE_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const LINE_VALID_COLOR: Color = Color::srgb(0.3, 0.9, 0.4);
const LINE_INVALID_COLOR: Color = Color::srgb(0.95, 0.25, 0.25);

/// Sample the cursor as a world-space ray and the primary button edges.
pub(crate) fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut pointer: ResMut<PortPointer>,
) {
    pointer.just_pressed = buttons.just_pressed(MouseButton::Left);
    pointer.just_released = buttons.just_released(MouseButton::Left);
    pointer.ray = None;

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(transform, cursor) else {
        return;
    };

    pointer.ray = Some(PointerRay {
        origin: ray.origin,
        direction: *ray.direction,
    });
}

pub(crate) fn register_ports(
    added: Query<&PortHandle, Added<PortHandle>>,
    connections: Res<DoorConnections>,
    mut ports: ResMut<ConnectionPorts>,
) {
    for handle in &added {
        ports.register(handle.door, handle.goes_right, &connections);
        debug!(
            "[PORTS] Registered port for {} (connected={})",
            handle.door,
            connections.is_opened(handle.door)
        );
    }
}

/// Clicking a plug in edit mode starts a connection drag from it.
pub(crate) fn begin_port_drag(
    pointer: Res<PortPointer>,
    machine: Res<PlayerStateMachine>,
    tuning: Res<PortTuning>,
    handles: Query<(&PortHandle, &GlobalTransform)>,
    mut ports: ResMut<ConnectionPorts>,
    mut connections: ResMut<DoorConnections>,
    mut disconnected: MessageWriter<DoorsDisconnected>,
) {
    if !pointer.just_pressed
        || machine.current() != PlayerState::PanelEditFreeze
        || ports.dragging().is_some()
    {
        return;
    }

    let mut picked: Option<(DoorId, Vec3, f32)> = None;
    for (handle, transform) in &handles {
        let plug = transform.translation();
        let Some(point) = pointer.project(plug.z) else {
            continue;
        };
        let distance = point.truncate().distance(plug.truncate());
        if distance > tuning.pick_radius {
            continue;
        }
        if picked.is_none_or(|(_, _, best)| distance < best) {
            picked = Some((handle.door, point, distance));
        }
    }

    let Some((door, point, _)) = picked else {
        return;
    };

    let broken = ports.connect_edit_started(door, point, &mut connections);
    info!("[PORTS] Drag started from {}", door);
    if let Some(partner) = broken {
        info!("[PORTS] Disconnected {} <-> {}", door, partner);
        disconnected.write(DoorsDisconnected {
            a: door,
            b: partner,
        });
    }
}

/// Move the dragged pointer proxy and track which plug it is over.
pub(crate) fn update_port_drag(
    pointer: Res<PortPointer>,
    tuning: Res<PortTuning>,
    index: Res<DoorIndex>,
    connections: Res<DoorConnections>,
    handles: Query<(&PortHandle, &GlobalTransform)>,
    mut ports: ResMut<ConnectionPorts>,
) {
    let Some(door) = ports.dragging() else {
        return;
    };
    let Some((_, plug_transform)) = handles.iter().find(|(handle, _)| handle.door == door) else {
        return;
    };

    let plug = plug_transform.translation();
    let rotation = plug_transform.rotation();
    if let Some(point) = pointer.project(plug.z) {
        ports.drag_pointer(door, point, rotation);
    }
    let Some(proxy) = ports.pointer_world(door, plug, rotation) else {
        return;
    };

    let overlapping = handles
        .iter()
        .filter(|(handle, _)| handle.door != door)
        .map(|(handle, transform)| {
            let distance = transform.translation().truncate().distance(proxy.truncate());
            (handle.door, distance)
        })
        .filter(|(_, distance)| *distance <= tuning.overlap_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id);

    let current = ports.candidate(door);
    if overlapping == current {
        return;
    }
    if let Some(previous) = current {
        ports.pointer_left(door, previous);
    }
    let Some(candidate) = overlapping else {
        return;
    };

    let angle_ok = candidate_angle_ok(&tuning, &index, door, candidate);
    if !angle_ok {
        debug!("[PORTS] {} is outside the angle limit for {}", candidate, door);
    }
    if ports.pointer_entered(door, candidate, angle_ok, &connections) {
        debug!("[PORTS] {} is targeting {}", door, candidate);
    }
}

/// Releasing the pointer ends the drag and commits or resets.
pub(crate) fn end_port_drag(
    pointer: Res<PortPointer>,
    mut ports: ResMut<ConnectionPorts>,
    mut connections: ResMut<DoorConnections>,
    mut connected: MessageWriter<DoorsConnected>,
) {
    if !pointer.just_released {
        return;
    }
    let Some(door) = ports.dragging() else {
        return;
    };

    match ports.connection_edit_ended(door, &mut connections) {
        EditOutcome::Connected { partner } => {
            info!("[PORTS] Connected {} <-> {}", door, partner);
            connected.write(DoorsConnected {
                a: door,
                b: partner,
            });
        }
        EditOutcome::Rejected { partner } => {
            debug!("[PORTS] {} refused a connection from {}", partner, door);
        }
        EditOutcome::Cancelled => {
            debug!("[PORTS] Drag from {} ended without a target", door);
        }
    }
}

/// Leaving edit mode mid-drag drops the gesture.
pub(crate) fn cancel_drag_outside_edit(
    machine: Res<PlayerStateMachine>,
    mut ports: ResMut<ConnectionPorts>,
    mut connections: ResMut<DoorConnections>,
) {
    if machine.current() == PlayerState::PanelEditFreeze || ports.dragging().is_none() {
        return;
    }
    if let Some(door) = ports.cancel_drag(&mut connections) {
        debug!("[PORTS] Drag from {} cancelled outside edit mode", door);
    }
}

pub(crate) fn draw_connection_lines(
    mut gizmos: Gizmos,
    ports: Res<ConnectionPorts>,
    tuning: Res<PortTuning>,
    index: Res<DoorIndex>,
    handles: Query<(&PortHandle, &GlobalTransform)>,
) {
    let plugs: HashMap<DoorId, (Vec3, Quat)> = handles
        .iter()
        .map(|(handle, transform)| (handle.door, (transform.translation(), transform.rotation())))
        .collect();

    for port in ports.iter().filter(|port| port.line.visible) {
        let Some(&(start, rotation)) = plugs.get(&port.door) else {
            continue;
        };
        let end = match port.line.partner {
            Some(partner) => plugs.get(&partner).map(|(position, _)| *position),
            None => ports.pointer_world(port.door, start, rotation),
        };
        let Some(end) = end else {
            continue;
        };

        let color = match port.line.partner.or(ports.candidate(port.door)) {
            Some(other)
                if angle_within_limit(&index, port.door, other, tuning.angle_limit_degrees) =>
            {
                LINE_VALID_COLOR
            }
            Some(_) => LINE_INVALID_COLOR,
            None => LINE_IDLE_COLOR,
        };

        gizmos.line(start, end, color);
        if port.line.partner.is_none() {
            gizmos.circle_2d(
                Isometry2d::from_translation(end.truncate()),
                tuning.overlap_radius,
                color,
            );
        }
    }
}

pub(crate) fn update_plug_sprites(
    ports: Res<ConnectionPorts>,
    mut plugs: Query<(&PortHandle, &mut Sprite)>,
) {
    if !ports.is_changed() {
        return;
    }
    for (handle, mut sprite) in &mut plugs {
        let Some(port) = ports.port(handle.door) else {
            continue;
        };
        let (color, flip) = match port.plug {
            PlugSprite::Full => (PLUG_REST_COLOR, false),
            PlugSprite::Left => (PLUG_LEFT_COLOR, false),
            PlugSprite::Right => (PLUG_RIGHT_COLOR, true),
        };
        sprite.color = color;
        sprite.flip_x = flip;
    }
}
