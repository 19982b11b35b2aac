use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::birth::valid_utc_offset;
use crate::model::HumanType;

/// Default trailing window for journal pattern detection, in days.
pub const DEFAULT_ECHO_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    pub echo_window_days: u32,
    /// Archetype used for journal analysis when none is given explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_archetype: Option<HumanType>,
    /// Applied to birth times entered without an explicit offset.
    pub utc_offset_minutes: i32,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            echo_window_days: DEFAULT_ECHO_WINDOW_DAYS,
            default_archetype: None,
            utc_offset_minutes: 0,
        }
    }
}

impl HelixConfig {
    /// Read config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Write config as TOML.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        self.validate()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| CoreError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.echo_window_days == 0 {
            return Err(CoreError::Config(
                "echo_window_days must be at least 1".into(),
            ));
        }
        if !valid_utc_offset(self.utc_offset_minutes) {
            return Err(CoreError::InvalidUtcOffset {
                minutes: self.utc_offset_minutes,
            });
        }
        Ok(())
    }
}
