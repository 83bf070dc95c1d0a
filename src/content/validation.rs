//! Validation for tuning values loaded from RON.

use super::data::{MovementTuning, PortTuning, TransitionTuning, TuningFile};

/// A tuning value outside its accepted range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub value: f32,
    pub expected: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} = {} is invalid (expected {})",
            self.section, self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for ValidationError {}

/// Helper macro for checking a value is strictly positive and finite
macro_rules! check_positive {
    ($errors:expr, $section:expr, $owner:expr, $field:ident) => {
        if !($owner.$field.is_finite() && $owner.$field > 0.0) {
            $errors.push(ValidationError {
                section: $section,
                field: stringify!($field),
                value: $owner.$field,
                expected: "a positive number",
            });
        }
    };
}

/// Validate every section of the tuning file.
/// Returns a list of validation errors, empty if all values are usable.
pub fn validate_tuning(tuning: &TuningFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let movement: &MovementTuning = &tuning.movement;
    check_positive!(errors, "movement", movement, move_speed);
    check_positive!(errors, "movement", movement, jump_velocity);
    check_positive!(errors, "movement", movement, max_fall_speed);
    check_positive!(errors, "movement", movement, ladder_speed);
    check_positive!(errors, "movement", movement, gravity);
    check_positive!(errors, "movement", movement, ground_probe);
    check_positive!(errors, "movement", movement, panel_rotate_speed);

    let transition: &TransitionTuning = &tuning.transition;
    check_positive!(errors, "transition", transition, base_speed);
    check_positive!(errors, "transition", transition, middle_segment_multiplier);
    if !(transition.exit_cooldown.is_finite() && transition.exit_cooldown >= 0.0) {
        errors.push(ValidationError {
            section: "transition",
            field: "exit_cooldown",
            value: transition.exit_cooldown,
            expected: "zero or a positive number",
        });
    }

    let ports: &PortTuning = &tuning.ports;
    if !(0.0..=180.0).contains(&ports.angle_limit_degrees) {
        errors.push(ValidationError {
            section: "ports",
            field: "angle_limit_degrees",
            value: ports.angle_limit_degrees,
            expected: "an angle between 0 and 180",
        });
    }
    check_positive!(errors, "ports", ports, pick_radius);
    check_positive!(errors, "ports", ports, overlap_radius);

    errors
}

/// Replace every section that failed validation with its defaults.
pub fn sanitize_tuning(mut tuning: TuningFile, errors: &[ValidationError]) -> TuningFile {
    if errors.iter().any(|e| e.section == "movement") {
        tuning.movement = MovementTuning::default();
    }
    if errors.iter().any(|e| e.section == "transition") {
        tuning.transition = TransitionTuning::default();
    }
    if errors.iter().any(|e| e.section == "ports") {
        tuning.ports = PortTuning::default();
    }
    tuning
}
