use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::kv::SqliteStorage;
use crate::db::log;
use crate::errors::AppResult;
use crate::models::coords::Coords;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init { home } = &cli.command else {
        return Ok(());
    };

    let home = home.as_deref().map(Coords::parse).transpose()?;
    let cfg = Config::init_all(cli.db.as_deref(), home, cli.test)?;

    println!("⚙️  Initializing rWorkoutlog…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &cfg.database);
    if let Some(h) = cfg.home {
        println!("🏠 Home       : {}", h);
    }

    let storage = SqliteStorage::open(&cfg.database)?;

    if let Err(e) = log::ttlog(
        &storage.pool().conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
