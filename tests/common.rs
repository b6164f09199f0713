#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Datelike, Local};
use rworkoutlog::core::controller::{AppEvent, ControllerOptions, Reaction, WorkoutController};
use rworkoutlog::core::storage::{KeyValueStorage, MemoryStorage};
use rworkoutlog::core::surfaces::{
    FormInput, FormSurface, GeolocationSource, ListEntry, ListSurface, MapSurface, Notice,
    Notifier, Popup, Surfaces, ViewOptions,
};
use rworkoutlog::errors::{AppError, AppResult};
use rworkoutlog::models::coords::Coords;
use rworkoutlog::models::workout_type::WorkoutType;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rwl() -> Command {
    cargo_bin_cmd!("rworkoutlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworkoutlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a test DB through the CLI
pub fn init_db(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Pull the id out of an `add` success line: "... saved (id 1234567890)."
pub fn id_from_add_output(stdout: &str) -> String {
    let start = stdout.find("(id ").expect("id in output") + 4;
    let end = stdout[start..].find(')').expect("closing paren") + start;
    stdout[start..end].to_string()
}

/// Description expected for a workout created right now.
pub fn today_description(kind: WorkoutType) -> String {
    let now = Local::now();
    format!("{} on {} {}", kind.label(), now.format("%B"), now.day())
}

// ---------------------------------------------------------------------------
// Recording surfaces for library-level tests
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub views: Vec<(Coords, u8)>,
    pub markers: Vec<(Coords, Popup)>,
    pub recenters: Vec<(Coords, u8, ViewOptions)>,
}

impl MapSurface for RecordingMap {
    fn create_view(&mut self, center: Coords, zoom: u8) {
        self.views.push((center, zoom));
    }

    fn add_marker(&mut self, coords: Coords, popup: &Popup) {
        self.markers.push((coords, popup.clone()));
    }

    fn set_view(&mut self, coords: Coords, zoom: u8, options: &ViewOptions) {
        self.recenters.push((coords, zoom, *options));
    }
}

#[derive(Debug, Default)]
pub struct FakeForm {
    pub input: FormInput,
    pub visible: bool,
    pub clears: usize,
    pub variant_field: Option<WorkoutType>,
}

impl FakeForm {
    pub fn fill(&mut self, kind: &str, distance: &str, duration: &str, variant: &str) {
        self.input = FormInput {
            kind: kind.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: String::new(),
        };
        match WorkoutType::wt_from_str(kind) {
            Some(WorkoutType::Cycling) => self.input.elevation = variant.to_string(),
            _ => self.input.cadence = variant.to_string(),
        }
    }
}

impl FormSurface for FakeForm {
    fn read(&self) -> FormInput {
        self.input.clone()
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.input = FormInput::default();
    }

    fn show_variant_field(&mut self, kind: WorkoutType) {
        self.variant_field = Some(kind);
    }
}

#[derive(Debug, Default)]
pub struct RecordingList {
    pub entries: Vec<ListEntry>,
}

impl ListSurface for RecordingList {
    fn append_entry(&mut self, entry: &ListEntry) {
        self.entries.push(entry.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Geolocation answering with a fixed outcome, or never.
pub struct FixedGeolocation(pub Option<Result<Coords, String>>);

impl GeolocationSource for FixedGeolocation {
    fn current_position(&mut self) -> Option<AppResult<Coords>> {
        self.0
            .clone()
            .map(|r| r.map_err(AppError::LocationUnavailable))
    }
}

pub type TestController =
    WorkoutController<RecordingMap, FakeForm, RecordingList, RecordingNotifier, MemoryStorage>;

pub const HOME: Coords = Coords {
    lat: 51.5,
    lng: -0.1,
};

pub fn surfaces() -> Surfaces<RecordingMap, FakeForm, RecordingList, RecordingNotifier> {
    Surfaces::default()
}

/// Controller started on `storage`, map not loaded yet.
pub fn started(storage: MemoryStorage) -> TestController {
    let mut c = WorkoutController::new(surfaces(), storage, ControllerOptions::default());
    c.start();
    c
}

/// Controller started on `storage` with the map loaded at `HOME`.
pub fn with_map(storage: MemoryStorage) -> TestController {
    let mut c = started(storage);
    let r = c
        .handle(AppEvent::PositionResolved(HOME))
        .expect("map load");
    assert!(matches!(r, Reaction::MapLoaded { .. }));
    c
}

/// Click the map at `at`, fill the form and submit it.
pub fn submit<S: KeyValueStorage>(
    c: &mut WorkoutController<RecordingMap, FakeForm, RecordingList, RecordingNotifier, S>,
    at: Coords,
    kind: &str,
    distance: &str,
    duration: &str,
    variant: &str,
) -> Reaction {
    assert_eq!(
        c.handle(AppEvent::MapClicked(at)).expect("map click"),
        Reaction::FormOpened
    );
    c.surfaces_mut()
        .form
        .fill(kind, distance, duration, variant);
    c.handle(AppEvent::FormSubmitted).expect("submit")
}
