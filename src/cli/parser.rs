use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for rWorkoutlog
#[derive(Parser, Debug)]
#[command(
    name = "rworkoutlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple workout logging CLI: pin running and cycling sessions on a map and keep them in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Current position as LAT,LNG (overrides the configured home)
    #[arg(
        global = true,
        long = "here",
        value_name = "LAT,LNG",
        allow_hyphen_values = true
    )]
    pub here: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Increase log verbosity (-v, -vv, -vvv). Defaults to WARN.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q).
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        /// Home location the map opens on, as LAT,LNG
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        home: Option<String>,
    },

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Record a workout at a point on the map
    Add {
        /// Workout type: running or cycling
        #[arg(value_name = "TYPE")]
        kind: String,

        /// Latitude of the workout
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the workout
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Distance in km
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Cadence in steps/min (running)
        #[arg(long, allow_hyphen_values = true)]
        cadence: Option<String>,

        /// Elevation gain in meters (cycling)
        #[arg(long = "elevation", allow_hyphen_values = true)]
        elevation: Option<String>,
    },

    /// List recorded workouts
    List,

    /// Center the map on a workout
    Show {
        /// Workout id, as shown by `list`
        id: String,
    },

    /// Delete stored workouts and start over
    Reset {
        /// Clear the whole storage, not only the workouts
        #[arg(long)]
        all: bool,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
