//! Collaborators the controller talks to.
//!
//! The controller never draws, prompts or locates anything itself; each
//! concern sits behind one of these traits. Clicks and submissions come
//! back to it as `AppEvent`s.

use crate::errors::AppResult;
use crate::models::coords::Coords;
use crate::models::workout::{Workout, WorkoutId};
use crate::models::workout_type::WorkoutType;
use crate::utils::formatting::fmt_number;
use std::fmt;

/// Popup attached to a workout marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub content: String,
    pub class_name: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Popup {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            content: format!("{} {}", kind.icon(), workout.description),
            class_name: format!("{}-popup", kind.wt_as_str()),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// How `set_view` moves to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub animate: bool,
    /// seconds
    pub pan_duration: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            animate: true,
            pan_duration: 1.0,
        }
    }
}

pub trait MapSurface {
    fn create_view(&mut self, center: Coords, zoom: u8);
    fn add_marker(&mut self, coords: Coords, popup: &Popup);
    fn set_view(&mut self, coords: Coords, zoom: u8, options: &ViewOptions);
}

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

pub trait FormSurface {
    fn read(&self) -> FormInput;
    fn show(&mut self);
    fn hide(&mut self);
    fn clear(&mut self);
    /// Make the field of `kind` (cadence or elevation) the visible one.
    fn show_variant_field(&mut self, kind: WorkoutType);
}

/// One icon/value/unit cell of a list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// Structured descriptor of a rendered list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub kind: WorkoutType,
    pub title: String,
    pub details: Vec<EntryDetail>,
}

impl ListEntry {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut details = vec![
            EntryDetail {
                icon: kind.icon(),
                value: fmt_number(workout.distance),
                unit: "km",
            },
            EntryDetail {
                icon: "⏱",
                value: fmt_number(workout.duration),
                unit: "min",
            },
        ];

        match kind {
            WorkoutType::Running => {
                details.push(EntryDetail {
                    icon: "⚡️",
                    value: format!("{:.1}", workout.pace().unwrap_or(f64::NAN)),
                    unit: "min/km",
                });
                details.push(EntryDetail {
                    icon: "🦶🏼",
                    value: fmt_number(workout.cadence().unwrap_or(f64::NAN)),
                    unit: "spm",
                });
            }
            WorkoutType::Cycling => {
                details.push(EntryDetail {
                    icon: "⚡️",
                    value: format!("{:.1}", workout.speed().unwrap_or(f64::NAN)),
                    unit: "km/h",
                });
                details.push(EntryDetail {
                    icon: "⛰",
                    value: fmt_number(workout.elevation_gain().unwrap_or(f64::NAN)),
                    unit: "m",
                });
            }
        }

        Self {
            id: workout.id.clone(),
            kind,
            title: workout.description.clone(),
            details,
        }
    }
}

pub trait ListSurface {
    fn append_entry(&mut self, entry: &ListEntry);
}

/// User-visible notices. None of them stops the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    InvalidInput,
    UnknownWorkoutType(String),
    LocationUnavailable(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidInput => f.write_str("Inputs have to be positive numbers!"),
            Notice::UnknownWorkoutType(t) => write!(f, "Unknown workout type '{t}'"),
            Notice::LocationUnavailable(reason) => {
                write!(f, "Could not get your position ({reason})")
            }
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

/// Source of the user's current position.
///
/// `None` models a request that never resolves; the controller then
/// simply stays mapless.
pub trait GeolocationSource {
    fn current_position(&mut self) -> Option<AppResult<Coords>>;
}

/// The rendering/input side of a controller, bundled.
#[derive(Debug, Default)]
pub struct Surfaces<M, F, L, N> {
    pub map: M,
    pub form: F,
    pub list: L,
    pub notices: N,
}
