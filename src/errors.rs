//! Unified application error type.
//! All modules (models, core, db, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Inputs have to be positive numbers")]
    Validation,

    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoords(String),

    // ---------------------------
    // Session errors
    // ---------------------------
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Map is not available: set a home location with `init --home` or pass --here")]
    MapUnavailable,

    #[error("No workout with id {0}")]
    WorkoutNotFound(String),

    #[error("Workout {0} is already stored")]
    DuplicateWorkout(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type AppResult<T> = Result<T, AppError>;
