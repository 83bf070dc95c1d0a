//! Transition domain: tests for path construction and interpolation.

use bevy::prelude::{Quat, Vec2, Vec3};

use super::{PanelTransition, TransitionError, TransitionPath, TransitionStep};
use crate::content::TransitionTuning;
use crate::panels::{Anchor, DoorConnections, DoorId, DoorIndex, DoorPose, PanelId};

const DT: f32 = 0.1;

fn door(
    id: u32,
    panel: u32,
    inside: Vec3,
    outside: Vec3,
    is_horizontal: bool,
    goes_right: bool,
) -> DoorPose {
    DoorPose {
        id: DoorId(id),
        panel: PanelId(panel),
        inside: Anchor::new(inside, Quat::IDENTITY),
        outside: Anchor::new(outside, Quat::IDENTITY),
        is_horizontal,
        goes_right,
    }
}

/// Door A on panel 1 facing right, door B on panel 2 facing left.
fn door_pair() -> (DoorPose, DoorPose) {
    let a = door(1, 1, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), true, true);
    let b = door(
        2,
        2,
        Vec3::new(60.0, 0.0, 0.0),
        Vec3::new(40.0, 0.0, 0.0),
        true,
        false,
    );
    (a, b)
}

fn engine() -> PanelTransition {
    PanelTransition::new(TransitionTuning {
        base_speed: 10.0,
        ..TransitionTuning::default()
    })
}

// -----------------------------------------------------------------------------
// Path construction
// -----------------------------------------------------------------------------

#[test]
fn test_path_nodes_follow_door_anchors_with_offset() {
    let (a, b) = door_pair();
    let character = Vec3::new(2.0, 5.0, 0.0);

    let path = TransitionPath::build(&a, &b, character);
    let nodes = path.nodes();

    assert_eq!(path.offset, Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(nodes[0].position, a.inside.position + path.offset);
    assert_eq!(nodes[1].position, a.outside.position + path.offset);
    assert_eq!(nodes[2].position, b.outside.position + path.offset);
    assert_eq!(nodes[3].position, b.inside.position + path.offset);
    assert_eq!(nodes[0].door, a.id);
    assert_eq!(nodes[1].door, a.id);
    assert_eq!(nodes[2].door, b.id);
    assert_eq!(nodes[3].door, b.id);
    assert_eq!(nodes[3].panel, PanelId(2));
}

#[test]
fn test_vertical_door_offsets_on_x() {
    let a = door(1, 1, Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), false, true);
    let b = door(
        2,
        2,
        Vec3::new(0.0, 50.0, 0.0),
        Vec3::new(0.0, 30.0, 0.0),
        false,
        false,
    );

    let path = TransitionPath::build(&a, &b, Vec3::new(-3.0, 4.0, 0.0));
    assert_eq!(path.offset, Vec3::new(-3.0, 0.0, 0.0));
    assert!(!path.is_horizontal);
}

#[test]
fn test_initial_progress_projects_character() {
    let (a, b) = door_pair();
    let mut transition = engine();

    transition.build_path(&a, &b, Vec3::new(2.0, 0.0, 0.0));

    assert_eq!(transition.previous_node(), 0);
    assert_eq!(transition.next_node(), 1);
    assert!((transition.progress() - 0.2).abs() < 1e-5);
}

#[test]
fn test_initial_progress_is_clamped() {
    let (a, b) = door_pair();
    let mut transition = engine();

    transition.build_path(&a, &b, Vec3::new(-35.0, 0.0, 0.0));
    assert_eq!(transition.progress(), 1.0);

    transition.build_path(&a, &b, Vec3::ZERO);
    assert_eq!(transition.progress(), 0.0);
}

#[test]
fn test_begin_without_target_is_rejected_without_mutation() {
    let (a, _) = door_pair();
    let mut doors = DoorIndex::default();
    doors.insert(a.clone());
    let connections = DoorConnections::default();
    let mut transition = engine();

    assert_eq!(
        transition.begin(&doors, &connections, Vec3::ZERO),
        Err(TransitionError::NoEnteredDoor)
    );

    transition.door_entered(a.id);
    assert_eq!(
        transition.begin(&doors, &connections, Vec3::ZERO),
        Err(TransitionError::MissingTarget(a.id))
    );
    assert!(!transition.is_active());
}

#[test]
fn test_begin_failure_keeps_running_path() {
    let (a, b) = door_pair();
    let mut doors = DoorIndex::default();
    doors.insert(a.clone());
    doors.insert(b.clone());
    let mut connections = DoorConnections::default();
    connections.connect(a.id, b.id).unwrap();

    let mut transition = engine();
    transition.door_entered(a.id);
    transition.begin(&doors, &connections, Vec3::new(3.0, 0.0, 0.0)).unwrap();
    let before = transition.clone();

    connections.disconnect(a.id);
    assert!(transition.begin(&doors, &connections, Vec3::ZERO).is_err());
    assert_eq!(transition.progress(), before.progress());
    assert_eq!(transition.path(), before.path());
}

// -----------------------------------------------------------------------------
// Interpolation
// -----------------------------------------------------------------------------

#[test]
fn test_progress_is_monotonic_under_constant_input() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::ZERO);

    let mut last = transition.progress();
    for _ in 0..5 {
        let step = transition.advance(Vec2::X, DT);
        assert!(matches!(step, TransitionStep::Moved { .. }));
        assert!(transition.progress() > last);
        last = transition.progress();
    }
    assert!((last - 0.5).abs() < 1e-4);
}

#[test]
fn test_no_input_holds_position() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::new(4.0, 0.0, 0.0));

    let step = transition.advance(Vec2::ZERO, DT);
    match step {
        TransitionStep::Moved { position, .. } => {
            assert!((position - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-4);
        }
        other => panic!("unexpected step {:?}", other),
    }
    assert!((transition.progress() - 0.4).abs() < 1e-5);
}

#[test]
fn test_left_facing_door_inverts_input() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&b, &a, Vec3::new(55.0, 0.0, 0.0));

    assert_eq!(transition.forward_direction(), -1);
    assert_eq!(transition.signed_input(Vec2::new(-1.0, 0.0)), 1);
    assert_eq!(transition.signed_input(Vec2::new(0.4, 0.0)), 0);

    let before = transition.progress();
    transition.advance(Vec2::new(-1.0, 0.0), DT);
    assert!(transition.progress() > before);
}

#[test]
fn test_advance_node_pair_sets_multiplier_and_visibility() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::ZERO);

    let step = transition.advance_node_pair(1);
    assert_eq!(
        step,
        TransitionStep::NodeReached {
            node: 1,
            door: a.id,
            panel: PanelId(1),
            visible: false,
        }
    );
    assert_eq!(transition.progress(), 0.0);
    assert_eq!(transition.speed_multiplier(), 2.5);

    transition.advance_node_pair(1);
    assert_eq!(transition.previous_node(), 2);
    assert_eq!(transition.next_node(), 3);
    assert_eq!(transition.speed_multiplier(), 1.0);
    assert!(transition.is_visible());

    transition.advance_node_pair(-1);
    assert_eq!(transition.previous_node(), 1);
    assert_eq!(transition.progress(), 1.0);
    assert_eq!(transition.speed_multiplier(), 2.5);
}

#[test]
fn test_advance_node_pair_refuses_out_of_range() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::ZERO);

    assert_eq!(transition.advance_node_pair(-1), TransitionStep::Idle);
    assert_eq!(transition.previous_node(), 0);
}

#[test]
fn test_full_forward_traversal() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::ZERO);

    let mut reached = Vec::new();
    let mut last_x = 0.0;
    let mut finished = None;

    for _ in 0..500 {
        match transition.advance(Vec2::X, DT) {
            TransitionStep::Moved { position, .. } => {
                assert!(position.x >= last_x - 1e-4);
                last_x = position.x;
            }
            TransitionStep::NodeReached { node, visible, .. } => {
                reached.push((node, visible, transition.speed_multiplier()));
            }
            TransitionStep::Finished {
                destination,
                destination_vertical,
            } => {
                finished = Some((destination, destination_vertical));
                break;
            }
            TransitionStep::Idle => panic!("path dropped mid-traversal"),
        }
    }

    assert_eq!(reached, vec![(1, false, 2.5), (2, true, 1.0)]);
    assert_eq!(finished, Some((b.id, false)));
    assert!((last_x - 60.0).abs() < 1e-3);
}

#[test]
fn test_middle_segment_is_faster() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::ZERO);
    transition.advance_node_pair(1);

    let step = transition.advance(Vec2::X, DT);
    let TransitionStep::Moved { position, .. } = step else {
        panic!("expected movement");
    };
    // base 10 u/s * 2.5 over 0.1 s from node 1 at x = 10
    assert!((position.x - 12.5).abs() < 1e-3);
}

#[test]
fn test_backing_out_returns_to_entered_door() {
    let (a, b) = door_pair();
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::ZERO);

    while !matches!(
        transition.advance(Vec2::X, DT),
        TransitionStep::NodeReached { .. }
    ) {}
    assert_eq!(transition.previous_node(), 1);
    assert!(!transition.is_visible());

    let mut backed = Vec::new();
    let mut finished = None;
    for _ in 0..500 {
        match transition.advance(Vec2::NEG_X, DT) {
            TransitionStep::NodeReached { node, visible, .. } => backed.push((node, visible)),
            TransitionStep::Finished {
                destination,
                destination_vertical,
            } => {
                finished = Some((destination, destination_vertical));
                break;
            }
            _ => {}
        }
    }

    assert_eq!(backed, vec![(1, true)]);
    assert_eq!(transition.previous_node(), 0);
    assert_eq!(finished, Some((a.id, false)));
}

#[test]
fn test_vertical_destination_is_reported() {
    let a = door(1, 1, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), true, true);
    let ladder = door(
        2,
        2,
        Vec3::new(20.0, 20.0, 0.0),
        Vec3::new(20.0, 10.0, 0.0),
        false,
        false,
    );
    let mut transition = engine();
    transition.build_path(&a, &ladder, Vec3::ZERO);

    let finished = (0..500).find_map(|_| match transition.advance(Vec2::X, DT) {
        TransitionStep::Finished {
            destination_vertical,
            ..
        } => Some(destination_vertical),
        _ => None,
    });
    assert_eq!(finished, Some(true));
}

#[test]
fn test_zero_length_segment_is_crossed() {
    let a = door(1, 1, Vec3::ZERO, Vec3::ZERO, true, true);
    let b = door(2, 2, Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, true, false);
    let mut transition = engine();
    transition.build_path(&a, &b, Vec3::ZERO);

    let step = transition.advance(Vec2::X, DT);
    assert!(matches!(step, TransitionStep::Moved { .. }));
    assert_eq!(transition.progress(), 1.0);
    assert!(matches!(
        transition.advance(Vec2::X, DT),
        TransitionStep::NodeReached { node: 1, .. }
    ));
}

#[test]
fn test_advance_without_path_is_idle() {
    let mut transition = engine();
    assert_eq!(transition.advance(Vec2::X, DT), TransitionStep::Idle);
}
