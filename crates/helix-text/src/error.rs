#[derive(Debug, Clone, thiserror::Error)]
pub enum TextError {
    #[error("Marker table '{table}' is empty")]
    EmptyMarkerTable { table: String },

    #[error("Invalid marker '{term}' in table '{table}': {reason}")]
    InvalidMarker {
        table: String,
        term: String,
        reason: String,
    },

    #[error("Invalid window: {days} days (must be at least 1)")]
    InvalidWindow { days: u32 },
}
