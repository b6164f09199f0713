use super::{coords::Coords, workout_type::WorkoutType};
use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque workout identifier.
///
/// Derived from the creation timestamp (last 10 digits of the epoch
/// milliseconds); uniqueness inside a store is enforced by
/// `WorkoutStore::next_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_timestamp_millis(millis: i64) -> Self {
        let digits = millis.unsigned_abs().to_string();
        let start = digits.len().saturating_sub(10);
        Self(digits[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant-specific input handed to the constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

impl Activity {
    pub fn kind(&self) -> WorkoutType {
        match self {
            Activity::Running { .. } => WorkoutType::Running,
            Activity::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Variant payload together with its derived metric.
///
/// Derived values are plain data: computed once in `Workout::new` and
/// restored verbatim from storage, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Metrics {
    Running {
        cadence: f64,
        /// min/km
        #[serde(deserialize_with = "nan_if_null")]
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        #[serde(deserialize_with = "nan_if_null")]
        speed: f64,
    },
}

/// JSON has no non-finite numbers: serde_json writes them as `null`.
fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl Metrics {
    pub fn kind(&self) -> WorkoutType {
        match self {
            Metrics::Running { .. } => WorkoutType::Running,
            Metrics::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// A single recorded activity.
///
/// Immutable after construction, apart from the `clicks` counter.
/// The constructor trusts its caller: a zero distance or duration yields a
/// non-finite pace/speed instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    #[serde(rename = "date")]
    pub created_at: DateTime<Local>,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// min
    pub duration: f64,
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl Workout {
    pub fn new(
        id: WorkoutId,
        created_at: DateTime<Local>,
        coords: Coords,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> Self {
        let metrics = match activity {
            Activity::Running { cadence } => Metrics::Running {
                cadence,
                pace: duration / distance,
            },
            Activity::Cycling { elevation_gain } => Metrics::Cycling {
                elevation_gain,
                speed: distance / (duration / 60.0),
            },
        };

        Self {
            description: describe(activity.kind(), &created_at),
            id,
            created_at,
            coords,
            distance,
            duration,
            clicks: 0,
            metrics,
        }
    }

    pub fn running(
        id: WorkoutId,
        created_at: DateTime<Local>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        Self::new(
            id,
            created_at,
            coords,
            distance,
            duration,
            Activity::Running { cadence },
        )
    }

    pub fn cycling(
        id: WorkoutId,
        created_at: DateTime<Local>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::new(
            id,
            created_at,
            coords,
            distance,
            duration,
            Activity::Cycling { elevation_gain },
        )
    }

    pub fn kind(&self) -> WorkoutType {
        self.metrics.kind()
    }

    pub fn pace(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Running { pace, .. } => Some(pace),
            Metrics::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Cycling { speed, .. } => Some(speed),
            Metrics::Running { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Running { cadence, .. } => Some(cadence),
            Metrics::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Cycling { elevation_gain, .. } => Some(elevation_gain),
            Metrics::Running { .. } => None,
        }
    }

    /// Count a selection of this workout.
    ///
    /// Part of the record's contract but not called by the controller's
    /// selection flow.
    pub fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

/// "<Type> on <Month> <day>" for the given creation date.
pub fn describe(kind: WorkoutType, date: &DateTime<Local>) -> String {
    format!("{} on {} {}", kind.label(), date.format("%B"), date.day())
}
