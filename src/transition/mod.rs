//! Transition domain: path building and interpolation between connected doors.

mod engine;
mod path;

#[cfg(test)]
mod tests;

pub use engine::{PanelTransition, TransitionError, TransitionStep};
pub use path::{LAST_NODE, PATH_NODES, PathNode, TransitionPath};

use bevy::prelude::*;

use crate::content::TransitionTuning;

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TransitionTuning>()
            .init_resource::<PanelTransition>()
            .add_systems(
                Update,
                sync_transition_tuning.run_if(resource_changed::<TransitionTuning>),
            );
    }
}

fn sync_transition_tuning(tuning: Res<TransitionTuning>, mut transition: ResMut<PanelTransition>) {
    transition.set_tuning(tuning.clone());
}
