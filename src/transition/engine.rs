//! Transition domain: moves the character along the path between two doors.
//!
//! Positive signed input always means "toward the target door", whichever
//! way the entered door faces; `forward_direction` folds the door's
//! orientation into the raw axis value.

use bevy::prelude::*;

use crate::content::TransitionTuning;
use crate::panels::{DoorConnections, DoorId, DoorIndex, DoorPose, PanelId};
use crate::transition::path::{LAST_NODE, TransitionPath};

/// Why a transition path could not be built. Every variant is an invariant
/// violation elsewhere in the game (a door was entered without a committed
/// connection, or a pose was never indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    NoEnteredDoor,
    UnknownDoor(DoorId),
    MissingTarget(DoorId),
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::NoEnteredDoor => {
                write!(f, "transition requested before any door was entered")
            }
            TransitionError::UnknownDoor(door) => write!(f, "{} has no indexed pose", door),
            TransitionError::MissingTarget(door) => write!(
                f,
                "{} was entered while opened but has no connected target door",
                door
            ),
        }
    }
}

impl std::error::Error for TransitionError {}

/// Outcome of one call to [`PanelTransition::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStep {
    /// No path is active.
    Idle,
    /// The character should be placed here.
    Moved { position: Vec3, rotation: Quat },
    /// A node boundary was crossed and the next pair is now being traversed.
    NodeReached {
        node: usize,
        door: DoorId,
        panel: PanelId,
        visible: bool,
    },
    /// An end of the path was reached while pushing past it.
    Finished {
        destination: DoorId,
        destination_vertical: bool,
    },
}

#[derive(Resource, Debug, Clone)]
pub struct PanelTransition {
    tuning: TransitionTuning,
    entered_door: Option<DoorId>,
    path: Option<TransitionPath>,
    target_horizontal: bool,
    previous_node: usize,
    next_node: usize,
    progress: f32,
    forward_direction: i32,
    speed_multiplier: f32,
    visible: bool,
}

impl FromWorld for PanelTransition {
    fn from_world(world: &mut World) -> Self {
        let tuning = world
            .get_resource::<TransitionTuning>()
            .cloned()
            .unwrap_or_default();
        Self::new(tuning)
    }
}

impl PanelTransition {
    pub fn new(tuning: TransitionTuning) -> Self {
        Self {
            tuning,
            entered_door: None,
            path: None,
            target_horizontal: true,
            previous_node: 0,
            next_node: 1,
            progress: 0.0,
            forward_direction: 1,
            speed_multiplier: 1.0,
            visible: true,
        }
    }

    pub fn set_tuning(&mut self, tuning: TransitionTuning) {
        self.tuning = tuning;
    }

    /// Register the door the character just walked into.
    pub fn door_entered(&mut self, door: DoorId) {
        self.entered_door = Some(door);
    }

    pub fn entered_door(&self) -> Option<DoorId> {
        self.entered_door
    }

    /// Build a path from the registered entered door to its connected target.
    /// On error nothing is mutated.
    pub fn begin(
        &mut self,
        doors: &DoorIndex,
        connections: &DoorConnections,
        character: Vec3,
    ) -> Result<(), TransitionError> {
        let entered_id = self.entered_door.ok_or(TransitionError::NoEnteredDoor)?;
        let entered = doors
            .get(entered_id)
            .ok_or(TransitionError::UnknownDoor(entered_id))?;
        let target_id = connections
            .target(entered_id)
            .ok_or(TransitionError::MissingTarget(entered_id))?;
        let target = doors
            .get(target_id)
            .ok_or(TransitionError::UnknownDoor(target_id))?;

        self.build_path(entered, target, character);
        Ok(())
    }

    /// Start traversing `entered -> target` from the character's position.
    pub fn build_path(&mut self, entered: &DoorPose, target: &DoorPose, character: Vec3) {
        let path = TransitionPath::build(entered, target, character);

        self.entered_door = Some(entered.id);
        self.forward_direction = if entered.goes_right { 1 } else { -1 };
        self.target_horizontal = target.is_horizontal;
        self.previous_node = 0;
        self.next_node = 1;
        self.speed_multiplier = 1.0;
        self.visible = true;
        self.progress = path.initial_progress(character);

        debug!(
            "Transition path {} -> {}: forward={}, progress={:.3}",
            entered.id, target.id, self.forward_direction, self.progress
        );
        self.path = Some(path);
    }

    pub fn clear(&mut self) {
        self.path = None;
        self.previous_node = 0;
        self.next_node = 1;
        self.progress = 0.0;
        self.speed_multiplier = 1.0;
        self.visible = true;
    }

    pub fn is_active(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&TransitionPath> {
        self.path.as_ref()
    }

    pub fn previous_node(&self) -> usize {
        self.previous_node
    }

    pub fn next_node(&self) -> usize {
        self.next_node
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn forward_direction(&self) -> i32 {
        self.forward_direction
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Signed input along the travel axis: +1 toward the target door, -1
    /// back toward the entered door, 0 when idle.
    pub fn signed_input(&self, axis: Vec2) -> i32 {
        let Some(path) = &self.path else {
            return 0;
        };
        let component = if path.is_horizontal { axis.x } else { axis.y };
        (component.round() as i32).clamp(-1, 1) * self.forward_direction
    }

    /// Advance one frame. `axis` is the raw movement input; only the travel
    /// axis of the entered door is read.
    pub fn advance(&mut self, axis: Vec2, delta_secs: f32) -> TransitionStep {
        let signed = self.signed_input(axis);
        let Some(path) = &self.path else {
            return TransitionStep::Idle;
        };

        let at_end = (signed > 0 && self.progress >= 1.0) || (signed < 0 && self.progress <= 0.0);

        if !at_end {
            let length = path.segment_length(self.previous_node, self.next_node);
            if length > f32::EPSILON {
                let segment_time = length / (self.tuning.base_speed * self.speed_multiplier);
                self.progress = (self.progress + signed as f32 * delta_secs / segment_time)
                    .clamp(0.0, 1.0);
            } else if signed != 0 {
                // A zero-length segment is crossed on the first push.
                self.progress = if signed > 0 { 1.0 } else { 0.0 };
            }

            let from = path.node(self.previous_node);
            let to = path.node(self.next_node);
            return TransitionStep::Moved {
                position: from.position.lerp(to.position, self.progress),
                rotation: from.rotation.slerp(to.rotation, self.progress),
            };
        }

        let has_next_pair = (signed > 0 && self.next_node < LAST_NODE)
            || (signed < 0 && self.previous_node > 0);
        if has_next_pair {
            return self.advance_node_pair(signed);
        }

        let (end, destination_vertical) = if signed > 0 {
            (path.node(LAST_NODE), !self.target_horizontal)
        } else {
            (path.node(0), !path.is_horizontal)
        };
        debug!(
            "Transition finished at {} (signed={}, nodes={}..{})",
            end.door, signed, self.previous_node, self.next_node
        );
        TransitionStep::Finished {
            destination: end.door,
            destination_vertical,
        }
    }

    /// Shift the traversed pair by one node in `direction` (+1 or -1).
    /// Toggles visibility and reports the panel owning the node just reached.
    pub fn advance_node_pair(&mut self, direction: i32) -> TransitionStep {
        let direction = direction.signum();
        let can_shift = (direction > 0 && self.next_node < LAST_NODE)
            || (direction < 0 && self.previous_node > 0);
        let Some(path) = self.path.as_ref().filter(|_| can_shift) else {
            return TransitionStep::Idle;
        };

        let reached_index = if direction > 0 {
            self.next_node
        } else {
            self.previous_node
        };
        let reached = *path.node(reached_index);

        self.progress = if direction > 0 { 0.0 } else { 1.0 };
        self.previous_node = (self.previous_node as i32 + direction) as usize;
        self.next_node = (self.next_node as i32 + direction) as usize;
        self.visible = !self.visible;
        // The outside-to-outside segment spans the gap between panels.
        self.speed_multiplier = if self.previous_node + self.next_node == 3 {
            self.tuning.middle_segment_multiplier
        } else {
            1.0
        };

        TransitionStep::NodeReached {
            node: reached_index,
            door: reached.door,
            panel: reached.panel,
            visible: self.visible,
        }
    }
}
