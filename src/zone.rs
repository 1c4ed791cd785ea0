use std::fmt;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

use crate::error::ParseError;

const SECONDS_PER_DAY: i32 = 86_400;

/// The host's UTC offset, captured once at startup.
///
/// Daylight-saving transitions that happen while the process runs are not
/// picked up; every rendering uses the offset observed at `detect()` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalOffset(FixedOffset);

impl LocalOffset {
    pub fn utc() -> Self {
        Self(Utc.fix())
    }

    /// Read the host's current offset.
    pub fn detect() -> Self {
        let offset = Local::now().offset().fix();
        log::debug!("detected local offset {}", offset);
        Self(offset)
    }

    /// Build a synthetic offset, seconds east of UTC.
    pub fn from_seconds(secs: i32) -> Result<Self, ParseError> {
        if secs.abs() >= SECONDS_PER_DAY {
            return Err(ParseError::OutOfRange(format!(
                "offset of {} seconds is not a valid UTC offset",
                secs
            )));
        }
        FixedOffset::east_opt(secs)
            .map(Self)
            .ok_or_else(|| ParseError::OutOfRange(format!("offset of {} seconds", secs)))
    }

    pub fn fixed(&self) -> FixedOffset {
        self.0
    }

    pub fn seconds(&self) -> i32 {
        self.0.local_minus_utc()
    }

    /// Render the same instant at this offset.
    pub fn apply(&self, utc: &DateTime<Utc>) -> Result<DateTime<FixedOffset>, ParseError> {
        // The shifted wall clock can fall off either end of chrono's calendar.
        if utc.naive_utc().checked_add_offset(self.0).is_none() {
            return Err(ParseError::OutOfRange(format!(
                "{} cannot be shown at offset {}",
                utc.timestamp(),
                self
            )));
        }
        Ok(utc.with_timezone(&self.0))
    }
}

impl Default for LocalOffset {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for LocalOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.seconds();
        let sign = if secs < 0 { '-' } else { '+' };
        let abs = secs.abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
    }
}
