pub mod coords;
pub mod workout;
pub mod workout_type;
