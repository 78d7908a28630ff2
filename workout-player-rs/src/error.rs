use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Cannot open workout file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Workout file {path} is empty")]
    Empty { path: PathBuf },

    #[error("Unexpected header: expected {expected:?}, found {actual:?}")]
    Header {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Row {row}: expected {expected} fields, found {actual}")]
    FieldCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row}: field '{field}' must be an integer, found {value:?}")]
    NotAnInteger {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Row {row}: field '{field}' must be positive")]
    NotPositive { row: usize, field: &'static str },

    #[error("Row {row}: field 'name' must not be empty")]
    EmptyName { row: usize },

    #[error("Row {row}: field 'side' must be one of left, right, both or empty, found {value:?}")]
    InvalidSide { row: usize, value: String },

    #[error("Workout file {path} contains no sets")]
    NoSets { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("No workout files found in {dir}")]
    NoWorkouts { dir: PathBuf },

    #[error("Invalid selection: expected a number, found {input:?}")]
    NotANumber { input: String },

    #[error("Selection out of range: expected 1-{max}, found {selection}")]
    OutOfRange { selection: i64, max: usize },

    #[error("Selection prompt failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Cannot open alert sound {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot decode alert sound: {0}")]
    Decode(String),

    #[error("Audio device not available: {0}")]
    Device(String),
}

/// Top-level failure of a `play-workout` run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Terminal output failed: {0}")]
    Io(#[from] io::Error),
}
