//! Error type for the command line front end

use thiserror::Error;
use timetable_core::{AssignmentError, GenerationError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] timetable_core::Error),

    #[error("Generation failed ({kind}): {0}", kind = .0.kind())]
    Generation(#[from] GenerationError),

    #[error("Assignment failed ({kind}): {0}", kind = .0.kind())]
    Assignment(#[from] AssignmentError),

    #[error("Invalid input: {0}")]
    Input(String),
}
