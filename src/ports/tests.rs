//! Ports domain: tests for the connection edit flow.

use bevy::prelude::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

use super::{
    ConnectionLine, ConnectionPorts, EditOutcome, PlugSprite, PointerRay, PortPointer,
    candidate_angle_ok,
};
use crate::content::PortTuning;
use crate::panels::{Anchor, DoorConnections, DoorId, DoorIndex, DoorPose, PanelId};

const LEFT: DoorId = DoorId(1);
const RIGHT: DoorId = DoorId(2);
const OTHER_RIGHT: DoorId = DoorId(3);
const OTHER_LEFT: DoorId = DoorId(4);

/// Doors 1 and 3 go right, 2 and 4 go left.
fn setup() -> (ConnectionPorts, DoorConnections) {
    let connections = DoorConnections::default();
    let mut ports = ConnectionPorts::default();
    ports.register(LEFT, true, &connections);
    ports.register(RIGHT, false, &connections);
    ports.register(OTHER_RIGHT, true, &connections);
    ports.register(OTHER_LEFT, false, &connections);
    (ports, connections)
}

fn connect(ports: &mut ConnectionPorts, connections: &mut DoorConnections, a: DoorId, b: DoorId) {
    ports.connect_edit_started(a, Vec3::ZERO, connections);
    assert!(ports.pointer_entered(a, b, true, connections));
    assert_eq!(
        ports.connection_edit_ended(a, connections),
        EditOutcome::Connected { partner: b }
    );
}

// -----------------------------------------------------------------------------
// Drag gesture tests
// -----------------------------------------------------------------------------

#[test]
fn test_edit_started_shows_line_and_engages_plug() {
    let (mut ports, mut connections) = setup();

    let broken = ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);

    assert_eq!(broken, None);
    assert_eq!(ports.dragging(), Some(LEFT));
    let port = ports.port(LEFT).unwrap();
    assert_eq!(port.plug, PlugSprite::Left);
    assert_eq!(
        port.line,
        ConnectionLine {
            visible: true,
            partner: None,
        }
    );
}

#[test]
fn test_only_one_drag_at_a_time() {
    let (mut ports, mut connections) = setup();
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);
    ports.connect_edit_started(RIGHT, Vec3::ZERO, &mut connections);

    assert_eq!(ports.dragging(), Some(LEFT));
    assert!(ports.port(RIGHT).unwrap().gesture.is_none());
}

#[test]
fn test_pointer_offset_accumulates_in_local_frame() {
    let (mut ports, mut connections) = setup();
    let rotation = Quat::from_rotation_z(FRAC_PI_2);
    ports.connect_edit_started(LEFT, Vec3::new(5.0, 5.0, 0.0), &mut connections);

    ports.drag_pointer(LEFT, Vec3::new(5.0, 15.0, 0.0), rotation);
    ports.drag_pointer(LEFT, Vec3::new(8.0, 15.0, 0.0), rotation);

    let gesture = ports.port(LEFT).unwrap().gesture.unwrap();
    assert!((gesture.offset - Vec3::new(10.0, -3.0, 0.0)).length() < 1e-4);

    // The proxy tracks the pointer's world motion from the plug.
    let plug = Vec3::new(100.0, 0.0, 1.0);
    let proxy = ports.pointer_world(LEFT, plug, rotation).unwrap();
    assert!((proxy - Vec3::new(103.0, 10.0, 1.0)).length() < 1e-4);
}

#[test]
fn test_pointer_world_requires_a_drag() {
    let (ports, _) = setup();
    assert_eq!(ports.pointer_world(LEFT, Vec3::ZERO, Quat::IDENTITY), None);
}

// -----------------------------------------------------------------------------
// Candidate capture tests
// -----------------------------------------------------------------------------

#[test]
fn test_candidate_must_face_the_other_way() {
    let (mut ports, mut connections) = setup();
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);

    assert!(!ports.pointer_entered(LEFT, OTHER_RIGHT, true, &connections));
    assert_eq!(ports.candidate(LEFT), None);

    assert!(ports.pointer_entered(LEFT, RIGHT, true, &connections));
    assert_eq!(ports.candidate(LEFT), Some(RIGHT));
}

#[test]
fn test_candidate_cannot_be_self_or_connected() {
    let (mut ports, mut connections) = setup();
    connect(&mut ports, &mut connections, OTHER_RIGHT, OTHER_LEFT);

    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);
    assert!(!ports.pointer_entered(LEFT, LEFT, true, &connections));
    assert!(!ports.pointer_entered(LEFT, OTHER_LEFT, true, &connections));
    assert_eq!(ports.candidate(LEFT), None);
}

fn pose(id: DoorId, facing: Vec3) -> DoorPose {
    DoorPose {
        id,
        panel: PanelId(id.0),
        inside: Anchor::new(Vec3::ZERO, Quat::IDENTITY),
        outside: Anchor::new(facing, Quat::IDENTITY),
        is_horizontal: true,
        goes_right: id.0 % 2 == 1,
    }
}

/// LEFT faces +X, RIGHT faces -X, OTHER_LEFT faces +X like LEFT.
fn facing_index() -> DoorIndex {
    let mut index = DoorIndex::default();
    index.insert(pose(LEFT, Vec3::X));
    index.insert(pose(RIGHT, Vec3::NEG_X));
    index.insert(pose(OTHER_LEFT, Vec3::X));
    index
}

#[test]
fn test_enforced_angle_limit_blocks_candidate_capture() {
    let (mut ports, mut connections) = setup();
    let index = facing_index();
    let tuning = PortTuning::default();
    assert!(tuning.enforce_angle_limit);
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);

    let angle_ok = candidate_angle_ok(&tuning, &index, LEFT, OTHER_LEFT);
    assert!(!angle_ok);
    assert!(!ports.pointer_entered(LEFT, OTHER_LEFT, angle_ok, &connections));
    assert_eq!(ports.candidate(LEFT), None);

    let angle_ok = candidate_angle_ok(&tuning, &index, LEFT, RIGHT);
    assert!(angle_ok);
    assert!(ports.pointer_entered(LEFT, RIGHT, angle_ok, &connections));
    assert_eq!(ports.candidate(LEFT), Some(RIGHT));
}

#[test]
fn test_unenforced_angle_limit_lets_any_facing_through() {
    let (mut ports, mut connections) = setup();
    let index = facing_index();
    let tuning = PortTuning {
        enforce_angle_limit: false,
        ..PortTuning::default()
    };
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);

    let angle_ok = candidate_angle_ok(&tuning, &index, LEFT, OTHER_LEFT);
    assert!(angle_ok);
    assert!(ports.pointer_entered(LEFT, OTHER_LEFT, angle_ok, &connections));
    assert_eq!(ports.candidate(LEFT), Some(OTHER_LEFT));
    assert_eq!(
        ports.connection_edit_ended(LEFT, &mut connections),
        EditOutcome::Connected {
            partner: OTHER_LEFT
        }
    );
}

#[test]
fn test_unknown_door_fails_enforced_angle_check() {
    let index = facing_index();
    let tuning = PortTuning::default();
    assert!(!candidate_angle_ok(&tuning, &index, LEFT, OTHER_RIGHT));
}

#[test]
fn test_pointer_left_clears_matching_candidate_only() {
    let (mut ports, mut connections) = setup();
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);
    ports.pointer_entered(LEFT, RIGHT, true, &connections);

    ports.pointer_left(LEFT, OTHER_LEFT);
    assert_eq!(ports.candidate(LEFT), Some(RIGHT));

    ports.pointer_left(LEFT, RIGHT);
    assert_eq!(ports.candidate(LEFT), None);
}

// -----------------------------------------------------------------------------
// Edit end tests
// -----------------------------------------------------------------------------

#[test]
fn test_successful_edit_links_both_doors() {
    let (mut ports, mut connections) = setup();

    connect(&mut ports, &mut connections, LEFT, RIGHT);

    assert!(connections.is_opened(LEFT));
    assert!(connections.is_opened(RIGHT));
    assert_eq!(connections.target(LEFT), Some(RIGHT));
    assert_eq!(connections.target(RIGHT), Some(LEFT));
    assert_eq!(ports.dragging(), None);

    let requester = ports.port(LEFT).unwrap();
    assert_eq!(requester.line.partner, Some(RIGHT));
    assert!(requester.line.visible);
    assert!(requester.gesture.is_none());

    let requested = ports.port(RIGHT).unwrap();
    assert!(!requested.line.visible);
    assert_eq!(requested.plug, PlugSprite::Right);
}

#[test]
fn test_edit_without_candidate_resets_port() {
    let (mut ports, mut connections) = setup();
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);

    assert_eq!(
        ports.connection_edit_ended(LEFT, &mut connections),
        EditOutcome::Cancelled
    );

    let port = ports.port(LEFT).unwrap();
    assert_eq!(port.plug, PlugSprite::Full);
    assert!(!port.line.visible);
    assert!(connections.is_empty());
    assert_eq!(ports.dragging(), None);
}

#[test]
fn test_requested_port_refuses_when_connected() {
    let (mut ports, mut connections) = setup();
    connect(&mut ports, &mut connections, OTHER_RIGHT, RIGHT);

    assert!(!ports.connection_requested(RIGHT, LEFT, &mut connections));
    assert_eq!(connections.target(RIGHT), Some(OTHER_RIGHT));
    assert_eq!(connections.target(OTHER_RIGHT), Some(RIGHT));
    assert!(!connections.is_opened(LEFT));
}

#[test]
fn test_candidate_taken_mid_drag_is_rejected() {
    let (mut ports, mut connections) = setup();
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);
    assert!(ports.pointer_entered(LEFT, RIGHT, true, &connections));

    // Someone else claims the candidate before release.
    connections.connect(RIGHT, OTHER_RIGHT).unwrap();

    assert_eq!(
        ports.connection_edit_ended(LEFT, &mut connections),
        EditOutcome::Rejected { partner: RIGHT }
    );
    assert!(!connections.is_opened(LEFT));
    assert_eq!(connections.target(RIGHT), Some(OTHER_RIGHT));
    assert_eq!(ports.port(LEFT).unwrap().plug, PlugSprite::Full);
}

#[test]
fn test_dragging_a_connected_port_breaks_both_sides() {
    let (mut ports, mut connections) = setup();
    connect(&mut ports, &mut connections, LEFT, RIGHT);

    let broken = ports.connect_edit_started(RIGHT, Vec3::ZERO, &mut connections);

    assert_eq!(broken, Some(LEFT));
    assert!(connections.is_empty());
    let former = ports.port(LEFT).unwrap();
    assert_eq!(former.plug, PlugSprite::Full);
    assert_eq!(former.line, ConnectionLine::default());
    assert!(ports.is_dragging(RIGHT));
}

#[test]
fn test_cancel_drag_leaves_port_at_rest() {
    let (mut ports, mut connections) = setup();
    ports.connect_edit_started(LEFT, Vec3::ZERO, &mut connections);
    ports.pointer_entered(LEFT, RIGHT, true, &connections);

    assert_eq!(ports.cancel_drag(&mut connections), Some(LEFT));
    assert_eq!(ports.dragging(), None);
    assert_eq!(ports.candidate(LEFT), None);
    assert!(connections.is_empty());
    assert_eq!(ports.cancel_drag(&mut connections), None);
}

#[test]
fn test_register_reflects_existing_connection() {
    let mut connections = DoorConnections::default();
    connections.connect(LEFT, RIGHT).unwrap();

    let mut ports = ConnectionPorts::default();
    ports.register(LEFT, true, &connections);
    ports.register(RIGHT, false, &connections);

    assert_eq!(ports.len(), 2);
    assert_eq!(ports.port(LEFT).unwrap().line.partner, Some(RIGHT));
    assert!(!ports.port(RIGHT).unwrap().line.visible);
    assert_eq!(ports.port(RIGHT).unwrap().plug, PlugSprite::Right);
}

// -----------------------------------------------------------------------------
// Pointer projection tests
// -----------------------------------------------------------------------------

#[test]
fn test_pointer_ray_hits_depth_plane() {
    let pointer = PortPointer {
        ray: Some(PointerRay {
            origin: Vec3::new(10.0, 20.0, 100.0),
            direction: Vec3::NEG_Z,
        }),
        ..Default::default()
    };

    assert_eq!(pointer.project(1.0), Some(Vec3::new(10.0, 20.0, 1.0)));
}

#[test]
fn test_pointer_ray_misses_parallel_or_behind() {
    let parallel = PointerRay {
        origin: Vec3::ZERO,
        direction: Vec3::X,
    };
    assert_eq!(parallel.at_depth(5.0), None);

    let away = PointerRay {
        origin: Vec3::ZERO,
        direction: Vec3::NEG_Z,
    };
    assert_eq!(away.at_depth(5.0), None);
    assert_eq!(PortPointer::default().project(0.0), None);
}
