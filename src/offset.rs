use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;

use crate::error::{InvalidChoice, ParseError};
use crate::zone::LocalOffset;

/// Source of "now" for the generator.
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// How far back from "now" a generated timestamp should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OffsetChoice {
    Now,
    Minus2m,
    Minus5m,
    Minus10m,
    Minus15m,
    Minus30m,
    Minus45m,
    Minus1h30m,
}

impl OffsetChoice {
    /// Menu order.
    pub const ALL: [OffsetChoice; 8] = [
        OffsetChoice::Now,
        OffsetChoice::Minus2m,
        OffsetChoice::Minus5m,
        OffsetChoice::Minus10m,
        OffsetChoice::Minus15m,
        OffsetChoice::Minus30m,
        OffsetChoice::Minus45m,
        OffsetChoice::Minus1h30m,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OffsetChoice::Now => "now",
            OffsetChoice::Minus2m => "-2 minutes",
            OffsetChoice::Minus5m => "-5 minutes",
            OffsetChoice::Minus10m => "-10 minutes",
            OffsetChoice::Minus15m => "-15 minutes",
            OffsetChoice::Minus30m => "-30 minutes",
            OffsetChoice::Minus45m => "-45 minutes",
            OffsetChoice::Minus1h30m => "-1 hour 30 minutes",
        }
    }

    pub fn duration(&self) -> Duration {
        let minutes = match self {
            OffsetChoice::Now => 0,
            OffsetChoice::Minus2m => 2,
            OffsetChoice::Minus5m => 5,
            OffsetChoice::Minus10m => 10,
            OffsetChoice::Minus15m => 15,
            OffsetChoice::Minus30m => 30,
            OffsetChoice::Minus45m => 45,
            OffsetChoice::Minus1h30m => 90,
        };
        Duration::minutes(minutes)
    }

    /// 1-based position in the menu.
    pub fn menu_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .map_or(0, |i| i + 1)
    }

    /// Parse a menu entry, `1` through `8`.
    pub fn from_menu(input: &str) -> Result<Self, InvalidChoice> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidChoice::new(trimmed));
        }
        match trimmed.parse::<usize>() {
            Ok(n) if (1..=Self::ALL.len()).contains(&n) => Ok(Self::ALL[n - 1]),
            _ => Err(InvalidChoice::new(trimmed)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub label: String,
    pub utc: DateTime<Utc>,
    pub local: DateTime<FixedOffset>,
    pub epoch_seconds: i64,
}

/// Whole seconds since epoch, truncated toward the epoch.
pub fn whole_seconds(dt: &DateTime<Utc>) -> i64 {
    let secs = dt.timestamp();
    if secs < 0 && dt.timestamp_subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Compute `now_utc - choice` and its renderings.
pub fn generate(
    now_utc: DateTime<Utc>,
    choice: OffsetChoice,
    offset: &LocalOffset,
) -> Result<Generated, ParseError> {
    let target = now_utc
        .checked_sub_signed(choice.duration())
        .ok_or_else(|| ParseError::OutOfRange(format!("{} {}", now_utc, choice.label())))?;
    let local = offset.apply(&target)?;
    log::debug!("generated {} ({}) from {}", target, choice.label(), now_utc);

    Ok(Generated {
        label: choice.label().to_string(),
        utc: target,
        local,
        epoch_seconds: whole_seconds(&target),
    })
}

/// The "show current timestamp" shortcut.
pub fn current(now_utc: DateTime<Utc>, offset: &LocalOffset) -> Result<Generated, ParseError> {
    let mut generated = generate(now_utc, OffsetChoice::Now, offset)?;
    generated.label = "Current time".to_string();
    Ok(generated)
}
