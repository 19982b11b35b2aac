use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Largest accepted distance of a local clock from UTC.
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// A user-supplied birth date and local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Offset of the local clock from UTC. Zero treats the time as UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl BirthMoment {
    /// Parse `YYYY-MM-DD` and an optional `HH:MM`. Missing time means midday.
    pub fn parse(date: &str, time: Option<&str>) -> Result<Self, CoreError> {
        let date = parse_date(date)?;
        let time = match time {
            Some(t) if !t.trim().is_empty() => parse_time(t)?,
            _ => midday(),
        };
        Ok(Self {
            date,
            time,
            utc_offset_minutes: 0,
        })
    }

    /// Set the local clock's offset from UTC.
    pub fn with_utc_offset(mut self, minutes: i32) -> Result<Self, CoreError> {
        if !valid_utc_offset(minutes) {
            return Err(CoreError::InvalidUtcOffset { minutes });
        }
        self.utc_offset_minutes = minutes;
        Ok(self)
    }

    /// The UTC instant used for ephemeris lookups.
    pub fn instant(&self) -> DateTime<Utc> {
        let local = self.date.and_time(self.time);
        (local - Duration::minutes(i64::from(self.utc_offset_minutes))).and_utc()
    }
}

impl std::fmt::Display for BirthMoment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.date.format("%Y-%m-%d"),
            self.time.format("%H:%M")
        )?;
        if self.utc_offset_minutes != 0 {
            let sign = if self.utc_offset_minutes < 0 { '-' } else { '+' };
            let abs = self.utc_offset_minutes.unsigned_abs();
            write!(f, " UTC{sign}{:02}:{:02}", abs / 60, abs % 60)?;
        }
        Ok(())
    }
}

pub fn valid_utc_offset(minutes: i32) -> bool {
    (-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes)
}

fn midday() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    // chrono tolerates unpadded fields, the input contract does not
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(CoreError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, CoreError> {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    let shaped = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !shaped {
        return Err(CoreError::InvalidTime {
            value: value.to_string(),
        });
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| CoreError::InvalidTime {
        value: value.to_string(),
    })
}
