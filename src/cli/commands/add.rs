use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::controller::{AppEvent, Reaction};
use crate::core::surfaces::{FormInput, Notice};
use crate::db::log;
use crate::errors::{AppError, AppResult};
use crate::models::coords::Coords;
use crate::models::workout_type::WorkoutType;
use crate::ui::messages::{success, warning};
use crate::ui::terminal::{ArgsForm, render_entries};

/// Record a workout: click the map at the given point, pick the type and
/// submit the form filled from the arguments.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Add {
        kind,
        lat,
        lng,
        distance,
        duration,
        cadence,
        elevation,
    } = &cli.command
    else {
        return Ok(());
    };

    let at = Coords::checked(*lat, *lng)
        .ok_or_else(|| AppError::InvalidCoords(format!("{lat},{lng}")))?;

    let form = ArgsForm::new(FormInput {
        kind: kind.clone(),
        distance: distance.clone(),
        duration: duration.clone(),
        cadence: cadence.clone().unwrap_or_default(),
        elevation: elevation.clone().unwrap_or_default(),
    });

    let (mut controller, _) = open_session(cli, cfg, form)?;

    if controller.handle(AppEvent::MapClicked(at))? == Reaction::Ignored {
        return Err(AppError::MapUnavailable);
    }

    if let Some(k) = WorkoutType::wt_from_str(kind) {
        controller.handle(AppEvent::TypeChanged(k))?;
    }

    match controller.handle(AppEvent::FormSubmitted)? {
        Reaction::Committed(id) => {
            let description = controller
                .store()
                .find(&id)
                .map(|w| format!("{} {}", w.kind().icon(), w.description))
                .unwrap_or_default();

            if let Err(e) = log::ttlog(
                &controller.storage().pool().conn,
                "add",
                id.as_str(),
                &description,
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }

            success(format!("{} saved (id {}).", description, id));

            let entries = &controller.surfaces().list.entries;
            print!("{}", render_entries(&entries[entries.len().saturating_sub(1)..]));
            Ok(())
        }
        _ => match controller.surfaces().notices.shown.last() {
            Some(Notice::UnknownWorkoutType(t)) => Err(AppError::UnknownWorkoutType(t.clone())),
            _ => Err(AppError::Validation),
        },
    }
}
