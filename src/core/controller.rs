use crate::core::storage::KeyValueStorage;
use crate::core::store::WorkoutStore;
use crate::core::surfaces::{
    FormSurface, ListEntry, ListSurface, MapSurface, Notice, Notifier, Popup, Surfaces,
    ViewOptions,
};
use crate::core::validator::{Submission, parse_number, validate_submission};
use crate::errors::{AppError, AppResult};
use crate::models::coords::Coords;
use crate::models::workout::{Workout, WorkoutId};
use crate::models::workout_type::WorkoutType;
use chrono::Local;
use tracing::{debug, info, warn};

pub const DEFAULT_ZOOM_LEVEL: u8 = 13;
pub const DEFAULT_STORAGE_KEY: &str = "workout";

/// Discrete inputs the controller reacts to, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    PositionResolved(Coords),
    PositionFailed(String),
    MapClicked(Coords),
    TypeChanged(WorkoutType),
    FormSubmitted,
    FormCancelled,
    /// `None` when the click did not land on a workout entry.
    EntryClicked(Option<WorkoutId>),
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    MapLoaded { markers: usize },
    LocationUnavailable,
    FormOpened,
    FormClosed,
    FieldToggled(WorkoutType),
    Committed(WorkoutId),
    Rejected,
    Recentered(WorkoutId),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Idle,
    Open { pending: Coords },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocationRequest {
    NotRequested,
    Pending,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    /// Remove only the workouts key.
    Workouts,
    /// Clear the whole storage.
    Everything,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub zoom_level: u8,
    pub storage_key: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM_LEVEL,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Application context: owns the store, the storage it mirrors to and the
/// surfaces, for the whole lifetime of a session.
pub struct WorkoutController<M, F, L, N, S> {
    surfaces: Surfaces<M, F, L, N>,
    storage: S,
    store: WorkoutStore,
    options: ControllerOptions,
    form_state: FormState,
    location: LocationRequest,
    map_ready: bool,
}

impl<M, F, L, N, S> WorkoutController<M, F, L, N, S>
where
    M: MapSurface,
    F: FormSurface,
    L: ListSurface,
    N: Notifier,
    S: KeyValueStorage,
{
    pub fn new(surfaces: Surfaces<M, F, L, N>, storage: S, options: ControllerOptions) -> Self {
        Self {
            surfaces,
            storage,
            store: WorkoutStore::new(),
            options,
            form_state: FormState::Idle,
            location: LocationRequest::NotRequested,
            map_ready: false,
        }
    }

    /// Startup: mark the position request as outstanding, rehydrate the
    /// store and render every recovered workout to the list.
    ///
    /// Markers wait for the map; see `AppEvent::PositionResolved`.
    pub fn start(&mut self) {
        if self.location == LocationRequest::NotRequested {
            self.location = LocationRequest::Pending;
        }

        self.store = WorkoutStore::rehydrate(&self.storage, &self.options.storage_key);
        for workout in self.store.iter() {
            self.surfaces
                .list
                .append_entry(&ListEntry::for_workout(workout));
        }

        info!(workouts = self.store.len(), "session started");
    }

    pub fn handle(&mut self, event: AppEvent) -> AppResult<Reaction> {
        debug!(?event, state = ?self.form_state, "handling event");

        let reaction = match event {
            AppEvent::PositionResolved(coords) => self.load_map(coords),
            AppEvent::PositionFailed(reason) => self.location_failed(reason),
            AppEvent::MapClicked(coords) => self.show_form(coords),
            AppEvent::TypeChanged(kind) => {
                self.surfaces.form.show_variant_field(kind);
                Reaction::FieldToggled(kind)
            }
            AppEvent::FormSubmitted => self.new_workout()?,
            AppEvent::FormCancelled => self.cancel_form(),
            AppEvent::EntryClicked(id) => self.move_to_workout(id),
        };

        debug!(?reaction, state = ?self.form_state, "event handled");
        Ok(reaction)
    }

    fn load_map(&mut self, center: Coords) -> Reaction {
        if self.location != LocationRequest::Pending {
            warn!(%center, "position arrived without a pending request, dropped");
            return Reaction::Ignored;
        }
        self.location = LocationRequest::Settled;

        self.surfaces.map.create_view(center, self.options.zoom_level);
        self.map_ready = true;

        for workout in self.store.iter() {
            self.surfaces
                .map
                .add_marker(workout.coords, &Popup::for_workout(workout));
        }

        info!(%center, markers = self.store.len(), "map loaded");
        Reaction::MapLoaded {
            markers: self.store.len(),
        }
    }

    fn location_failed(&mut self, reason: String) -> Reaction {
        if self.location != LocationRequest::Pending {
            return Reaction::Ignored;
        }
        self.location = LocationRequest::Settled;

        warn!(%reason, "position unavailable, continuing without map");
        self.surfaces
            .notices
            .notify(&Notice::LocationUnavailable(reason));
        Reaction::LocationUnavailable
    }

    fn show_form(&mut self, coords: Coords) -> Reaction {
        if !self.map_ready {
            return Reaction::Ignored;
        }

        self.form_state = FormState::Open { pending: coords };
        self.surfaces.form.show();
        Reaction::FormOpened
    }

    fn cancel_form(&mut self) -> Reaction {
        if self.form_state == FormState::Idle {
            return Reaction::Ignored;
        }
        self.close_form();
        Reaction::FormClosed
    }

    fn close_form(&mut self) {
        self.surfaces.form.clear();
        self.surfaces.form.hide();
        self.form_state = FormState::Idle;
    }

    /// Commit path: validate, construct, persist, then render.
    fn new_workout(&mut self) -> AppResult<Reaction> {
        let FormState::Open { pending } = self.form_state else {
            return Ok(Reaction::Ignored);
        };

        let input = self.surfaces.form.read();

        let Some(kind) = WorkoutType::wt_from_str(&input.kind) else {
            self.surfaces
                .notices
                .notify(&Notice::UnknownWorkoutType(input.kind));
            return Ok(Reaction::Rejected);
        };

        let variant_raw = match kind {
            WorkoutType::Running => &input.cadence,
            WorkoutType::Cycling => &input.elevation,
        };

        let submission = Submission {
            kind,
            distance: parse_number(&input.distance),
            duration: parse_number(&input.duration),
            variant_value: parse_number(variant_raw),
        };

        let activity = match validate_submission(&submission) {
            Ok(activity) => activity,
            Err(AppError::Validation) => {
                debug!(?submission, "submission rejected");
                self.surfaces.notices.notify(&Notice::InvalidInput);
                return Ok(Reaction::Rejected);
            }
            Err(e) => return Err(e),
        };

        let created_at = Local::now();
        let id = self.store.next_id(&created_at);
        let workout = Workout::new(
            id.clone(),
            created_at,
            pending,
            submission.distance,
            submission.duration,
            activity,
        );

        // Nothing is rendered or kept until storage has accepted the record;
        // on failure the form stays open with its input.
        let mut next = self.store.clone();
        next.push(workout.clone())?;
        next.persist(&mut self.storage, &self.options.storage_key)?;
        self.store = next;

        self.surfaces
            .map
            .add_marker(workout.coords, &Popup::for_workout(&workout));
        self.surfaces
            .list
            .append_entry(&ListEntry::for_workout(&workout));

        self.close_form();

        info!(id = %id, kind = kind.wt_as_str(), "workout committed");
        Ok(Reaction::Committed(id))
    }

    fn move_to_workout(&mut self, id: Option<WorkoutId>) -> Reaction {
        if !self.map_ready {
            return Reaction::Ignored;
        }
        let Some(id) = id else {
            return Reaction::Ignored;
        };
        let Some(workout) = self.store.find(&id) else {
            warn!(id = %id, "clicked entry has no workout");
            return Reaction::Ignored;
        };

        self.surfaces.map.set_view(
            workout.coords,
            self.options.zoom_level,
            &ViewOptions::default(),
        );
        Reaction::Recentered(id)
    }

    /// Clear persisted workouts. The in-memory session is stale afterwards:
    /// the driver must rebuild a controller (see `into_parts`).
    pub fn reset(&mut self, scope: ResetScope) -> AppResult<()> {
        match scope {
            ResetScope::Workouts => self.storage.remove(&self.options.storage_key)?,
            ResetScope::Everything => self.storage.clear()?,
        }
        info!(?scope, "storage reset");
        Ok(())
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn surfaces(&self) -> &Surfaces<M, F, L, N> {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut Surfaces<M, F, L, N> {
        &mut self.surfaces
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn form_state(&self) -> FormState {
        self.form_state
    }

    pub fn map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn into_parts(self) -> (Surfaces<M, F, L, N>, S) {
        (self.surfaces, self.storage)
    }
}
