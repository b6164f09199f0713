use serde::{Deserialize, Serialize};

/// Discriminant of a workout record, persisted as `"running"` / `"cycling"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn wt_from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" | "run" | "r" => Some(Self::Running),
            "cycling" | "cycle" | "c" => Some(Self::Cycling),
            _ => None,
        }
    }

    pub fn wt_as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Capitalized tag, as used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }

    /// Name of the form field that only this type shows.
    pub fn variant_field(&self) -> &'static str {
        match self {
            WorkoutType::Running => "cadence",
            WorkoutType::Cycling => "elevation",
        }
    }
}
