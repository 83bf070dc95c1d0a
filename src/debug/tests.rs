//! Debug domain: tests for hotkey helpers.

use bevy::prelude::Vec3;

use super::DebugState;
use super::systems::next_panel;
use crate::panels::{ActivePanel, PanelId, PuzzleArea};

fn puzzle() -> PuzzleArea {
    PuzzleArea {
        panels: vec![PanelId(1), PanelId(2), PanelId(3)],
        spawn_point: Vec3::ZERO,
    }
}

#[test]
fn test_next_panel_wraps_around() {
    let mut active = ActivePanel::default();

    active.set(PanelId(2));
    assert_eq!(next_panel(&puzzle(), &active), Some(PanelId(3)));

    active.set(PanelId(3));
    assert_eq!(next_panel(&puzzle(), &active), Some(PanelId(1)));
}

#[test]
fn test_next_panel_needs_another_panel() {
    let mut active = ActivePanel::default();
    assert_eq!(next_panel(&puzzle(), &active), None);

    let single = PuzzleArea {
        panels: vec![PanelId(1)],
        spawn_point: Vec3::ZERO,
    };
    active.set(PanelId(1));
    assert_eq!(next_panel(&single, &active), None);
}

#[test]
fn test_status_message_expires() {
    let mut state = DebugState::default();
    state.set_message("hello", 1.0);

    state.tick_message(0.5);
    assert!(state.status_message.is_some());

    state.tick_message(0.6);
    assert!(state.status_message.is_none());
}
