use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three text spectra scored by the signal filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Spectrum {
    Entropy,
    Integration,
    Expansion,
}

impl std::fmt::Display for Spectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Spectrum::Entropy => "ENTROPY",
            Spectrum::Integration => "INTEGRATION",
            Spectrum::Expansion => "EXPANSION",
        };
        f.write_str(s)
    }
}

/// A single journal entry. Owned by the caller, read-only to the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<Spectrum>,
}

impl EchoEntry {
    /// New entry with a generated id.
    pub fn new(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().as_simple().to_string(),
            timestamp,
            text: text.into(),
            spectrum: None,
        }
    }

    pub fn with_spectrum(mut self, spectrum: Spectrum) -> Self {
        self.spectrum = Some(spectrum);
        self
    }
}
