use crate::core::storage::KeyValueStorage;
use crate::errors::{AppError, AppResult};
use crate::models::workout::{Workout, WorkoutId};
use chrono::{DateTime, Local};
use tracing::{debug, warn};

/// Ordered, append-only collection of the session's workouts.
///
/// Insertion order is creation order and display order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout; ids must stay unique.
    pub fn push(&mut self, workout: Workout) -> AppResult<()> {
        if self.find(&workout.id).is_some() {
            return Err(AppError::DuplicateWorkout(workout.id.to_string()));
        }
        self.workouts.push(workout);
        Ok(())
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| &w.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Allocate an id for a workout created at `created_at`, skipping any
    /// id already present.
    pub fn next_id(&self, created_at: &DateTime<Local>) -> WorkoutId {
        let mut millis = created_at.timestamp_millis();
        loop {
            let id = WorkoutId::from_timestamp_millis(millis);
            if self.find(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.workouts)?)
    }

    /// Parse a stored array. A repeated id fails like any other corrupt
    /// payload.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let workouts: Vec<Workout> = serde_json::from_str(raw)?;
        let mut store = Self::new();
        for workout in workouts {
            store.push(workout)?;
        }
        Ok(store)
    }

    /// Rebuild the store from `storage[key]`.
    ///
    /// Missing, unreadable or corrupt data all mean "no prior workouts".
    pub fn rehydrate<S: KeyValueStorage + ?Sized>(storage: &S, key: &str) -> Self {
        let raw = match storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "no stored workouts");
                return Self::new();
            }
            Err(e) => {
                warn!(key, error = %e, "storage read failed, starting empty");
                return Self::new();
            }
        };

        match Self::from_json(&raw) {
            Ok(store) => {
                debug!(key, count = store.len(), "workouts rehydrated");
                store
            }
            Err(e) => {
                warn!(key, error = %e, "stored workouts are corrupt, starting empty");
                Self::new()
            }
        }
    }

    /// Write the whole store to `storage[key]`.
    pub fn persist<S: KeyValueStorage + ?Sized>(&self, storage: &mut S, key: &str) -> AppResult<()> {
        let raw = self.to_json()?;
        storage.set(key, &raw)?;
        debug!(key, count = self.len(), "workouts persisted");
        Ok(())
    }
}
