use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::controller::{AppEvent, Reaction};
use crate::errors::{AppError, AppResult};
use crate::models::workout::WorkoutId;
use crate::ui::terminal::{ArgsForm, render_entries};

/// Select a workout from the list: the map recenters on it.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Show { id } = &cli.command else {
        return Ok(());
    };

    let (mut controller, _) = open_session(cli, cfg, ArgsForm::default())?;

    if !controller.map_ready() {
        return Err(AppError::MapUnavailable);
    }

    let id = WorkoutId::new(id.trim());
    match controller.handle(AppEvent::EntryClicked(Some(id.clone())))? {
        Reaction::Recentered(id) => {
            let entry = controller
                .surfaces()
                .list
                .entries
                .iter()
                .filter(|e| e.id == id)
                .cloned()
                .collect::<Vec<_>>();
            print!("{}", render_entries(&entry));
            Ok(())
        }
        _ => Err(AppError::WorkoutNotFound(id.to_string())),
    }
}
