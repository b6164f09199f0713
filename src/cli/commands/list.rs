use crate::cli::commands::open_session;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::terminal::ArgsForm;

/// Print the workouts recovered from storage, oldest first.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let (controller, _) = open_session(cli, cfg, ArgsForm::default())?;
    let list = &controller.surfaces().list;

    if list.entries.is_empty() {
        info("No workouts recorded yet.");
        return Ok(());
    }

    println!("🗺️  {} workout(s):\n", list.entries.len());
    print!("{}", list.render());
    Ok(())
}
