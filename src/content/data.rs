//! Data definitions for the RON tuning file.
//!
//! These structs mirror the structure in assets/data/tuning.ron and are
//! deserialized once at startup. Each section becomes its own resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Tuning file (tuning.ron)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TuningFile {
    pub schema_version: u32,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub transition: TransitionTuning,
    #[serde(default)]
    pub ports: PortTuning,
}

// ============================================================================
// Movement
// ============================================================================

/// Free movement and ladder climbing values, in world units per second.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    pub ladder_speed: f32,
    /// Magnitude of the gravity vector; its direction follows the active panel.
    pub gravity: f32,
    /// Length of the downward probe used for the grounded check.
    pub ground_probe: f32,
    /// Degrees per second the active panel turns while edited.
    pub panel_rotate_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 220.0,
            jump_velocity: 520.0,
            max_fall_speed: 700.0,
            ladder_speed: 160.0,
            gravity: 1400.0,
            ground_probe: 4.0,
            panel_rotate_speed: 90.0,
        }
    }
}

// ============================================================================
// Panel transitions
// ============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitionTuning {
    /// Travel speed along the anchor segments, in world units per second.
    pub base_speed: f32,
    /// Speed multiplier while crossing the outside-to-outside segment.
    pub middle_segment_multiplier: f32,
    /// Seconds during which door triggers are ignored after a transition ends.
    pub exit_cooldown: f32,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            base_speed: 180.0,
            middle_segment_multiplier: 2.5,
            exit_cooldown: 0.3,
        }
    }
}

// ============================================================================
// Connection ports
// ============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortTuning {
    /// Minimum angle (degrees) between two doors' outward facings.
    pub angle_limit_degrees: f32,
    /// When set, candidates failing the angle rule are never captured.
    pub enforce_angle_limit: bool,
    /// Distance from a plug within which a press starts a drag.
    pub pick_radius: f32,
    /// Distance between the pointer proxy and another plug that counts as overlap.
    pub overlap_radius: f32,
}

impl Default for PortTuning {
    fn default() -> Self {
        Self {
            angle_limit_degrees: 90.0,
            enforce_angle_limit: true,
            pick_radius: 14.0,
            overlap_radius: 12.0,
        }
    }
}
