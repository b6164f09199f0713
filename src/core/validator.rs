//! Checks applied to form values before a workout is constructed.

use crate::errors::{AppError, AppResult};
use crate::models::workout::Activity;
use crate::models::workout_type::WorkoutType;

/// True iff every value is a finite number.
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// True iff every value is strictly greater than zero.
/// `NaN` is never positive.
pub fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

/// Numeric coercion of a raw form field.
///
/// Blank input counts as 0 and anything unparsable as `NaN`, so both are
/// caught by the predicates above instead of failing here.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Values of a submitted form after coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    pub kind: WorkoutType,
    pub distance: f64,
    pub duration: f64,
    /// Cadence for running, elevation gain for cycling.
    pub variant_value: f64,
}

impl Submission {
    pub fn activity(&self) -> Activity {
        match self.kind {
            WorkoutType::Running => Activity::Running {
                cadence: self.variant_value,
            },
            WorkoutType::Cycling => Activity::Cycling {
                elevation_gain: self.variant_value,
            },
        }
    }
}

/// Accept or reject a submission.
///
/// Every field must be finite. Positivity is required for distance and
/// duration, and for cadence; elevation gain may be zero or negative.
pub fn validate_submission(sub: &Submission) -> AppResult<Activity> {
    let fields = [sub.distance, sub.duration, sub.variant_value];

    let positive_ok = match sub.kind {
        WorkoutType::Running => all_positive(&fields),
        WorkoutType::Cycling => all_positive(&fields[..2]),
    };

    if !all_finite(&fields) || !positive_ok {
        return Err(AppError::Validation);
    }

    Ok(sub.activity())
}
