use rworkoutlog::core::app::boot;
use rworkoutlog::core::controller::{
    AppEvent, ControllerOptions, FormState, Reaction, ResetScope, WorkoutController,
};
use rworkoutlog::core::storage::{KeyValueStorage, MemoryStorage};
use rworkoutlog::core::store::WorkoutStore;
use rworkoutlog::core::surfaces::{Notice, ViewOptions};
use rworkoutlog::errors::{AppError, AppResult};
use rworkoutlog::models::coords::Coords;
use rworkoutlog::models::workout::WorkoutId;
use rworkoutlog::models::workout_type::WorkoutType;
use std::io;

mod common;
use common::{FixedGeolocation, HOME, started, submit, surfaces, today_description, with_map};

#[test]
fn scenario_a_running_commit() {
    let mut c = with_map(MemoryStorage::new());

    let r = submit(&mut c, Coords::new(51.5, -0.1), "running", "5", "30", "178");
    let Reaction::Committed(id) = r else {
        panic!("expected commit, got {r:?}");
    };

    assert_eq!(c.store().len(), 1);
    let w = c.store().find(&id).unwrap();
    assert_eq!(w.kind(), WorkoutType::Running);
    assert_eq!(w.pace(), Some(6.0));
    assert_eq!(w.coords, Coords::new(51.5, -0.1));
    assert_eq!(w.description, today_description(WorkoutType::Running));

    let list = &c.surfaces().list.entries;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, id);
    assert!(list[0].details.iter().any(|d| d.value == "6.0" && d.unit == "min/km"));

    let markers = &c.surfaces().map.markers;
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].1.class_name, "running-popup");

    let stored = c.storage().get("workout").unwrap().unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
    assert_eq!(records.len(), 1);

    assert_eq!(c.form_state(), FormState::Idle);
    assert!(!c.surfaces().form.visible);
    assert_eq!(c.surfaces().form.clears, 1);
}

#[test]
fn scenario_b_cycling_commit() {
    let mut c = with_map(MemoryStorage::new());

    let r = submit(&mut c, Coords::new(45.0, 7.6), "cycling", "20", "60", "400");
    let Reaction::Committed(id) = r else {
        panic!("expected commit, got {r:?}");
    };

    let w = c.store().find(&id).unwrap();
    assert_eq!(w.speed(), Some(20.0));
    assert_eq!(w.elevation_gain(), Some(400.0));
    assert_eq!(w.description, today_description(WorkoutType::Cycling));
}

#[test]
fn scenario_c_invalid_input_changes_nothing() {
    let mut c = with_map(MemoryStorage::new());

    let r = submit(&mut c, Coords::new(51.5, -0.1), "running", "-5", "30", "178");
    assert_eq!(r, Reaction::Rejected);

    assert!(c.store().is_empty());
    assert!(c.surfaces().list.entries.is_empty());
    assert!(c.surfaces().map.markers.is_empty());
    assert!(c.storage().is_empty());
    assert_eq!(c.surfaces().notices.notices, [Notice::InvalidInput]);

    // The form stays open for correction.
    assert_eq!(
        c.form_state(),
        FormState::Open {
            pending: Coords::new(51.5, -0.1)
        }
    );
    assert!(c.surfaces().form.visible);

    c.surfaces_mut().form.fill("running", "5", "30", "178");
    assert!(matches!(
        c.handle(AppEvent::FormSubmitted).unwrap(),
        Reaction::Committed(_)
    ));
}

#[test]
fn blank_and_garbage_fields_are_rejected() {
    let mut c = with_map(MemoryStorage::new());
    assert_eq!(
        submit(&mut c, HOME, "running", "", "30", "178"),
        Reaction::Rejected
    );
    assert_eq!(
        submit(&mut c, HOME, "cycling", "20", "abc", "100"),
        Reaction::Rejected
    );
    assert!(c.store().is_empty());
}

#[test]
fn cycling_accepts_negative_elevation() {
    let mut c = with_map(MemoryStorage::new());
    let r = submit(&mut c, HOME, "cycling", "12", "30", "-80");
    assert!(matches!(r, Reaction::Committed(_)));
    assert_eq!(c.store().workouts()[0].elevation_gain(), Some(-80.0));
}

#[test]
fn unknown_type_is_rejected_with_notice() {
    let mut c = with_map(MemoryStorage::new());
    let r = submit(&mut c, HOME, "swimming", "1", "30", "10");
    assert_eq!(r, Reaction::Rejected);
    assert_eq!(
        c.surfaces().notices.notices,
        [Notice::UnknownWorkoutType("swimming".to_string())]
    );
    assert!(c.store().is_empty());
}

#[test]
fn scenario_d_click_recenters_on_the_clicked_workout() {
    let mut c = with_map(MemoryStorage::new());
    let first = Coords::new(51.5, -0.1);
    let second = Coords::new(48.85, 2.35);

    let Reaction::Committed(_) = submit(&mut c, first, "running", "5", "30", "178") else {
        panic!("first commit");
    };
    let Reaction::Committed(id2) = submit(&mut c, second, "cycling", "20", "60", "0") else {
        panic!("second commit");
    };

    let r = c.handle(AppEvent::EntryClicked(Some(id2.clone()))).unwrap();
    assert_eq!(r, Reaction::Recentered(id2));

    let recenters = &c.surfaces().map.recenters;
    assert_eq!(recenters.len(), 1);
    assert_eq!(recenters[0].0, second);
    assert_eq!(recenters[0].1, 13);
    assert_eq!(recenters[0].2, ViewOptions::default());

    // Selection does not touch the click counter.
    assert!(c.store().iter().all(|w| w.clicks == 0));
}

#[test]
fn selection_is_a_no_op_without_map_or_entry() {
    let mut seed = with_map(MemoryStorage::new());
    submit(&mut seed, HOME, "running", "5", "30", "178");
    let (_, storage) = seed.into_parts();

    let mut c = started(storage);
    let id = c.store().workouts()[0].id.clone();
    assert_eq!(
        c.handle(AppEvent::EntryClicked(Some(id))).unwrap(),
        Reaction::Ignored
    );

    c.handle(AppEvent::PositionResolved(HOME)).unwrap();
    assert_eq!(c.handle(AppEvent::EntryClicked(None)).unwrap(), Reaction::Ignored);
    assert_eq!(
        c.handle(AppEvent::EntryClicked(Some(WorkoutId::new("nope"))))
            .unwrap(),
        Reaction::Ignored
    );
    assert!(c.surfaces().map.recenters.is_empty());
}

#[test]
fn rehydrated_workouts_render_list_then_markers_after_map_load() {
    let mut first = with_map(MemoryStorage::new());
    submit(&mut first, HOME, "running", "5", "30", "178");
    submit(&mut first, Coords::new(40.0, -3.7), "cycling", "30", "90", "250");
    let expected = first.store().clone();
    let (_, storage) = first.into_parts();

    let mut c = started(storage);
    assert_eq!(c.store(), &expected);
    assert_eq!(c.surfaces().list.entries.len(), 2);
    assert!(c.surfaces().map.markers.is_empty());

    let r = c.handle(AppEvent::PositionResolved(HOME)).unwrap();
    assert_eq!(r, Reaction::MapLoaded { markers: 2 });
    assert_eq!(c.surfaces().map.views, [(HOME, 13)]);
    let marker_coords: Vec<Coords> = c.surfaces().map.markers.iter().map(|m| m.0).collect();
    assert_eq!(marker_coords, [HOME, Coords::new(40.0, -3.7)]);
}

#[test]
fn rehydrating_twice_renders_the_same_list() {
    let mut first = with_map(MemoryStorage::new());
    submit(&mut first, HOME, "running", "5", "30", "178");
    let (_, storage) = first.into_parts();

    let a = started(storage.clone());
    let b = started(storage);
    assert_eq!(a.surfaces().list.entries, b.surfaces().list.entries);
}

#[test]
fn scenario_e_reset_then_reload_is_empty() {
    for scope in [ResetScope::Workouts, ResetScope::Everything] {
        let mut c = with_map(MemoryStorage::new());
        submit(&mut c, HOME, "running", "5", "30", "178");
        submit(&mut c, HOME, "cycling", "20", "60", "10");

        c.reset(scope).unwrap();
        let (_, storage) = c.into_parts();
        assert!(storage.get("workout").unwrap().is_none());

        let reloaded = started(storage);
        assert!(reloaded.store().is_empty());
        assert!(reloaded.surfaces().list.entries.is_empty());
    }
}

#[test]
fn reset_workouts_keeps_other_keys() {
    let mut storage = MemoryStorage::new();
    storage.set("theme", "dark").unwrap();

    let mut c = started(storage);
    c.reset(ResetScope::Workouts).unwrap();
    assert_eq!(c.storage().get("theme").unwrap().as_deref(), Some("dark"));

    c.reset(ResetScope::Everything).unwrap();
    assert!(c.storage().is_empty());
}

#[test]
fn location_failure_leaves_a_mapless_session() {
    let mut geo = FixedGeolocation(Some(Err("denied".to_string())));
    let (mut c, r) = boot(
        surfaces(),
        MemoryStorage::new(),
        ControllerOptions::default(),
        &mut geo,
    )
    .unwrap();

    assert_eq!(r, Reaction::LocationUnavailable);
    assert!(!c.map_ready());
    assert_eq!(
        c.surfaces().notices.notices,
        [Notice::LocationUnavailable("denied".to_string())]
    );
    assert_eq!(
        c.handle(AppEvent::MapClicked(HOME)).unwrap(),
        Reaction::Ignored
    );
    assert_eq!(c.form_state(), FormState::Idle);
}

#[test]
fn pending_location_never_resolving_is_harmless() {
    let mut geo = FixedGeolocation(None);
    let (c, r) = boot(
        surfaces(),
        MemoryStorage::new(),
        ControllerOptions::default(),
        &mut geo,
    )
    .unwrap();
    assert_eq!(r, Reaction::Ignored);
    assert!(!c.map_ready());
    assert!(c.surfaces().notices.notices.is_empty());
}

#[test]
fn only_one_position_outcome_is_accepted() {
    let mut c = with_map(MemoryStorage::new());
    assert_eq!(
        c.handle(AppEvent::PositionResolved(Coords::new(1.0, 1.0)))
            .unwrap(),
        Reaction::Ignored
    );
    assert_eq!(
        c.handle(AppEvent::PositionFailed("late".into())).unwrap(),
        Reaction::Ignored
    );
    assert_eq!(c.surfaces().map.views.len(), 1);

    let mut fresh = WorkoutController::new(
        surfaces(),
        MemoryStorage::new(),
        ControllerOptions::default(),
    );
    // No request was made before start().
    assert_eq!(
        fresh.handle(AppEvent::PositionResolved(HOME)).unwrap(),
        Reaction::Ignored
    );
}

#[test]
fn type_change_toggles_field_without_changing_state() {
    let mut c = with_map(MemoryStorage::new());
    c.handle(AppEvent::MapClicked(HOME)).unwrap();

    let r = c.handle(AppEvent::TypeChanged(WorkoutType::Cycling)).unwrap();
    assert_eq!(r, Reaction::FieldToggled(WorkoutType::Cycling));
    assert_eq!(c.surfaces().form.variant_field, Some(WorkoutType::Cycling));
    assert_eq!(c.form_state(), FormState::Open { pending: HOME });
}

#[test]
fn cancel_closes_the_form_and_submit_without_location_is_ignored() {
    let mut c = with_map(MemoryStorage::new());
    assert_eq!(c.handle(AppEvent::FormSubmitted).unwrap(), Reaction::Ignored);

    c.handle(AppEvent::MapClicked(HOME)).unwrap();
    assert_eq!(c.handle(AppEvent::FormCancelled).unwrap(), Reaction::FormClosed);
    assert_eq!(c.form_state(), FormState::Idle);
    assert!(!c.surfaces().form.visible);
    assert_eq!(c.handle(AppEvent::FormCancelled).unwrap(), Reaction::Ignored);
}

#[test]
fn custom_storage_key_and_zoom() {
    let options = ControllerOptions {
        zoom_level: 15,
        storage_key: "runs".to_string(),
    };
    let mut c = WorkoutController::new(surfaces(), MemoryStorage::new(), options);
    c.start();
    c.handle(AppEvent::PositionResolved(HOME)).unwrap();
    common::submit(&mut c, HOME, "running", "3", "18", "170");

    assert!(c.storage().get("workout").unwrap().is_none());
    let stored = c.storage().get("runs").unwrap().unwrap();
    assert_eq!(WorkoutStore::from_json(&stored).unwrap().len(), 1);
    assert_eq!(c.surfaces().map.views, [(HOME, 15)]);
}

/// Storage that reads fine but refuses every write.
struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }
    fn set(&mut self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }
    fn remove(&mut self, _key: &str) -> AppResult<()> {
        Ok(())
    }
    fn clear(&mut self) -> AppResult<()> {
        Ok(())
    }
}

#[test]
fn failed_write_leaves_session_untouched() {
    let mut c = WorkoutController::new(surfaces(), ReadOnlyStorage, ControllerOptions::default());
    c.start();
    c.handle(AppEvent::PositionResolved(HOME)).unwrap();

    let at = Coords::new(51.51, -0.12);
    c.handle(AppEvent::MapClicked(at)).unwrap();
    c.surfaces_mut().form.fill("running", "5", "30", "178");
    let r = c.handle(AppEvent::FormSubmitted);

    assert!(matches!(r, Err(AppError::Io(_))));
    assert!(c.store().is_empty());
    assert!(c.surfaces().list.entries.is_empty());
    assert!(c.surfaces().map.markers.is_empty());
    assert_eq!(c.form_state(), FormState::Open { pending: at });
    assert!(c.surfaces().form.visible);
}
