//! Content domain: data-driven tuning loaded from RON at startup.

mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{MovementTuning, PortTuning, TransitionTuning, TuningFile};
pub use loader::{ContentLoadError, load_tuning, parse_tuning};
pub use validation::{ValidationError, sanitize_tuning, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/tuning.ron";

pub struct ContentPlugin {
    pub tuning_path: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            tuning_path: PathBuf::from(TUNING_PATH),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let tuning = resolve_tuning(&self.tuning_path);

        app.insert_resource(tuning.movement)
            .insert_resource(tuning.transition)
            .insert_resource(tuning.ports);
    }
}

/// Load, validate, and sanitize tuning. Never fails: any problem falls back
/// to defaults for the affected section.
fn resolve_tuning(path: &std::path::Path) -> TuningFile {
    let tuning = match load_tuning(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default tuning", e);
            return TuningFile::default();
        }
    };

    let errors = validate_tuning(&tuning);
    for error in &errors {
        warn!("Tuning validation: {}", error);
    }

    let tuning = sanitize_tuning(tuning, &errors);
    info!(
        "Tuning loaded from {} (schema {}): move_speed={}, transition_speed={}, mid_multiplier={}, angle_limit={}",
        path.display(),
        tuning.schema_version,
        tuning.movement.move_speed,
        tuning.transition.base_speed,
        tuning.transition.middle_segment_multiplier,
        tuning.ports.angle_limit_degrees
    );
    tuning
}
