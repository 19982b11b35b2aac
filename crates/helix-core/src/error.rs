use thiserror::Error;

use crate::ephemeris::EphemerisError;
use crate::model::Body;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid time '{value}': expected 24-hour HH:MM")]
    InvalidTime { value: String },

    #[error("Invalid UTC offset {minutes} minutes: must be within +/-14 hours")]
    InvalidUtcOffset { minutes: i32 },

    #[error("Invalid angle for {field}: {value} is not a finite number")]
    InvalidAngle { field: &'static str, value: f64 },

    #[error("Missing {0} longitude in blueprint")]
    MissingLongitude(Body),

    #[error("Ephemeris lookup failed: {0}")]
    Ephemeris(#[from] EphemerisError),

    #[error("Person not found: {name}")]
    PersonNotFound { name: String },

    #[error("Person already exists: {name}")]
    PersonExists { name: String },

    #[error("Journal entry not found: {id}")]
    EntryNotFound { id: String },

    #[error("Data directory not initialized (run `helix init`)")]
    NotInitialized,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
