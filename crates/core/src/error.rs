use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid course count: {given}")]
    InvalidCount { given: i64 },

    #[error("Invalid units: {given} (units must be at least 1)")]
    InvalidUnits { given: i64 },

    #[error("Course not found: {index}")]
    CourseNotFound { index: u32 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
