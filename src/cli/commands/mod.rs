pub mod add;
pub mod config;
pub mod init;
pub mod list;
pub mod log;
pub mod reset;
pub mod show;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::app::boot;
use crate::core::controller::{Reaction, WorkoutController};
use crate::db::kv::SqliteStorage;
use crate::errors::AppResult;
use crate::models::coords::Coords;
use crate::ui::terminal::{
    ArgsForm, ConfigGeolocation, ConsoleNotifier, TerminalList, TerminalMap, terminal_surfaces,
};

pub type TerminalController =
    WorkoutController<TerminalMap, ArgsForm, TerminalList, ConsoleNotifier, SqliteStorage>;

/// Where this session's map opens: `--here` wins over the configured home.
pub fn resolve_position(cli: &Cli, cfg: &Config) -> AppResult<Option<Coords>> {
    match &cli.here {
        Some(raw) => Ok(Some(Coords::parse(raw)?)),
        None => Ok(cfg.home),
    }
}

/// Boot a terminal session against the configured database.
pub fn open_session(
    cli: &Cli,
    cfg: &Config,
    form: ArgsForm,
) -> AppResult<(TerminalController, Reaction)> {
    let storage = SqliteStorage::open(&cfg.database)?;
    let mut geolocation = ConfigGeolocation {
        position: resolve_position(cli, cfg)?,
    };

    boot(
        terminal_surfaces(form),
        storage,
        cfg.controller_options(),
        &mut geolocation,
    )
}
