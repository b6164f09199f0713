use crate::cli::commands::resolve_position;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::app::boot;
use crate::core::controller::{ResetScope, WorkoutController};
use crate::db::kv::SqliteStorage;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::terminal::{ArgsForm, ConfigGeolocation, terminal_surfaces};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Clear storage, then reload: a fresh session is booted on the same
/// database and must come up empty.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Reset { all, yes } = &cli.command else {
        return Ok(());
    };

    let (scope, prompt) = if *all {
        (
            ResetScope::Everything,
            "Clear ALL stored data? This action is irreversible.",
        )
    } else {
        (
            ResetScope::Workouts,
            "Delete ALL workouts? This action is irreversible.",
        )
    };

    if !*yes && !ask_confirmation(prompt) {
        info("Reset cancelled.");
        return Ok(());
    }

    let storage = SqliteStorage::open(&cfg.database)?;
    let mut controller = WorkoutController::new(
        terminal_surfaces(ArgsForm::default()),
        storage,
        cfg.controller_options(),
    );
    controller.reset(scope)?;

    let (_, storage) = controller.into_parts();
    if let Err(e) = log::ttlog(
        &storage.pool().conn,
        "reset",
        if *all { "all" } else { cfg.storage_key.as_str() },
        "Stored workouts cleared",
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    let mut geolocation = ConfigGeolocation {
        position: resolve_position(cli, cfg)?,
    };
    let (reloaded, _) = boot(
        terminal_surfaces(ArgsForm::default()),
        storage,
        cfg.controller_options(),
        &mut geolocation,
    )?;

    success(format!(
        "Workouts cleared. {} workout(s) after reload.",
        reloaded.store().len()
    ));
    Ok(())
}
