//! Panels domain: which panel the player is on and where a puzzle starts.

use bevy::prelude::*;

use crate::panels::components::PanelId;

/// The panel the player currently belongs to. Drives gravity direction and
/// the local movement frame.
#[derive(Resource, Debug, Default)]
pub struct ActivePanel {
    pub current: Option<PanelId>,
}

impl ActivePanel {
    /// Returns the panel that was active before, when it changed.
    pub fn set(&mut self, panel: PanelId) -> Option<Option<PanelId>> {
        if self.current == Some(panel) {
            return None;
        }
        Some(self.current.replace(panel))
    }
}

/// The group of panels forming one puzzle, with its starting point.
#[derive(Resource, Debug, Clone)]
pub struct PuzzleArea {
    /// The first panel is the one the player starts on.
    pub panels: Vec<PanelId>,
    pub spawn_point: Vec3,
}

impl PuzzleArea {
    pub fn starting_panel(&self) -> Option<PanelId> {
        self.panels.first().copied()
    }
}
