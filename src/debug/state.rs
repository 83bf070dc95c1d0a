//! Debug domain: state for the developer overlay and hotkeys.

use bevy::prelude::*;

/// Resource tracking debug tooling state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the info overlay and door gizmos are shown
    pub show_info: bool,
    /// Teleport to the puzzle start once the forced free state lands
    pub pending_reset: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    /// Count the message down, dropping it once expired.
    pub fn tick_message(&mut self, delta_secs: f32) {
        if let Some((_, ref mut duration)) = self.status_message {
            *duration -= delta_secs;
            if *duration <= 0.0 {
                self.status_message = None;
            }
        }
    }
}
