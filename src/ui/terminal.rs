//! Terminal implementations of the controller's surfaces.

use crate::core::surfaces::{
    FormInput, FormSurface, GeolocationSource, ListEntry, ListSurface, MapSurface, Notice,
    Notifier, Popup, ViewOptions,
};
use crate::errors::{AppError, AppResult};
use crate::models::coords::Coords;
use crate::models::workout_type::WorkoutType;
use crate::ui::messages::{info, warning};
use crate::utils::table::{Column, Table};
use tracing::{debug, info as log_info};

/// Map "drawn" as log lines; recentering prints an OpenStreetMap link.
#[derive(Debug, Default)]
pub struct TerminalMap {
    pub center: Option<(Coords, u8)>,
    pub markers: Vec<(Coords, Popup)>,
}

impl MapSurface for TerminalMap {
    fn create_view(&mut self, center: Coords, zoom: u8) {
        log_info!(%center, zoom, "map view created");
        self.center = Some((center, zoom));
    }

    fn add_marker(&mut self, coords: Coords, popup: &Popup) {
        debug!(%coords, content = %popup.content, "marker added");
        self.markers.push((coords, popup.clone()));
    }

    fn set_view(&mut self, coords: Coords, zoom: u8, options: &ViewOptions) {
        debug!(%coords, zoom, animate = options.animate, "map recentered");
        self.center = Some((coords, zoom));
        info(format!("📍 Centered on {} → {}", coords, coords.osm_url(zoom)));
    }
}

/// List kept in memory; commands decide what to print.
#[derive(Debug, Default)]
pub struct TerminalList {
    pub entries: Vec<ListEntry>,
}

impl ListSurface for TerminalList {
    fn append_entry(&mut self, entry: &ListEntry) {
        self.entries.push(entry.clone());
    }
}

impl TerminalList {
    pub fn render(&self) -> String {
        render_entries(&self.entries)
    }
}

/// Render entries as a table, one row per workout.
pub fn render_entries(entries: &[ListEntry]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new(""),
        Column::new("WORKOUT"),
        Column::new("DISTANCE"),
        Column::new("DURATION"),
        Column::new("PACE/SPEED"),
        Column::new("CADENCE/ELEV"),
    ]);

    for e in entries {
        let mut row = vec![e.id.to_string(), e.kind.icon().to_string(), e.title.clone()];
        row.extend(e.details.iter().map(|d| format!("{} {}", d.value, d.unit)));
        table.add_row(row);
    }

    table.render()
}

/// Form filled from command-line arguments.
#[derive(Debug, Default)]
pub struct ArgsForm {
    pub input: FormInput,
    pub visible: bool,
    pub variant_field: Option<WorkoutType>,
}

impl ArgsForm {
    pub fn new(input: FormInput) -> Self {
        Self {
            input,
            visible: false,
            variant_field: None,
        }
    }
}

impl FormSurface for ArgsForm {
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
        self.input = FormInput {
            kind: std::mem::take(&mut self.input.kind),
            ..FormInput::default()
        };
    }

    fn show_variant_field(&mut self, kind: WorkoutType) {
        debug!(field = kind.variant_field(), "variant field shown");
        self.variant_field = Some(kind);
    }
}

/// Prints notices as warnings and remembers them.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    pub shown: Vec<Notice>,
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: &Notice) {
        warning(notice);
        self.shown.push(notice.clone());
    }
}

/// Position taken from `--here` or the configured home.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigGeolocation {
    pub position: Option<Coords>,
}

impl GeolocationSource for ConfigGeolocation {
    fn current_position(&mut self) -> Option<AppResult<Coords>> {
        Some(self.position.ok_or_else(|| {
            AppError::LocationUnavailable("no home location configured".to_string())
        }))
    }
}

pub type TerminalSurfaces =
    crate::core::surfaces::Surfaces<TerminalMap, ArgsForm, TerminalList, ConsoleNotifier>;

pub fn terminal_surfaces(form: ArgsForm) -> TerminalSurfaces {
    TerminalSurfaces {
        map: TerminalMap::default(),
        form,
        list: TerminalList::default(),
        notices: ConsoleNotifier::default(),
    }
}
