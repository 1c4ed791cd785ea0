use std::num::IntErrorKind;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::error::ParseError;
use crate::zone::LocalOffset;

/// Magnitudes at or above this are read as milliseconds since epoch.
///
/// Second-precision timestamps stay below ~4e9 until 2106, and millisecond
/// timestamps exceed 1e11 for any date after early 1973. Values near the
/// boundary are ambiguous (seconds after year ~5138, milliseconds before
/// 1973) and are deliberately left that way for compatibility.
pub const MILLIS_THRESHOLD: i64 = 100_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    Seconds,
    Milliseconds,
}

impl TimestampUnit {
    /// Infer the unit from the magnitude of a raw timestamp.
    pub fn infer(raw: i64) -> Self {
        if raw.unsigned_abs() >= MILLIS_THRESHOLD as u64 {
            TimestampUnit::Milliseconds
        } else {
            TimestampUnit::Seconds
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimestampUnit::Seconds => "seconds",
            TimestampUnit::Milliseconds => "milliseconds",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub raw: i64,
    pub unit: TimestampUnit,
    pub utc: DateTime<Utc>,
    pub local: DateTime<FixedOffset>,
}

impl Interpretation {
    /// Whole seconds since epoch, truncated toward zero.
    pub fn epoch_seconds(&self) -> i64 {
        match self.unit {
            TimestampUnit::Seconds => self.raw,
            TimestampUnit::Milliseconds => self.raw / 1000,
        }
    }
}

/// Parse a seconds or milliseconds timestamp and render it in UTC and locally.
pub fn interpret(raw: &str, offset: &LocalOffset) -> Result<Interpretation, ParseError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseError::OutOfRange(format!("{} does not fit in 64 bits", trimmed))
        }
        _ => ParseError::NotANumber,
    })?;

    let unit = TimestampUnit::infer(value);
    let utc = match unit {
        TimestampUnit::Seconds => DateTime::from_timestamp(value, 0),
        TimestampUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    }
    .ok_or_else(|| {
        ParseError::OutOfRange(format!("{} {} is outside the calendar", value, unit.name()))
    })?;

    let local = offset.apply(&utc)?;
    log::debug!("interpreted {} as {} -> {}", value, unit.name(), utc);

    Ok(Interpretation {
        raw: value,
        unit,
        utc,
        local,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::iso;

    fn utc() -> LocalOffset {
        LocalOffset::utc()
    }

    #[test]
    fn test_seconds_scenario() {
        let result = interpret("1700000000", &utc()).unwrap();
        assert_eq!(result.unit, TimestampUnit::Seconds);
        assert_eq!(result.epoch_seconds(), 1_700_000_000);
        assert_eq!(iso(&result.utc), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_milliseconds_scenario() {
        let result = interpret("1700000000000", &utc()).unwrap();
        assert_eq!(result.unit, TimestampUnit::Milliseconds);
        assert_eq!(result.epoch_seconds(), 1_700_000_000);
        assert_eq!(iso(&result.utc), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(interpret("abc", &utc()), Err(ParseError::NotANumber));
        assert_eq!(interpret("", &utc()), Err(ParseError::NotANumber));
        assert_eq!(interpret("12.5", &utc()), Err(ParseError::NotANumber));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let result = interpret("  42\n", &utc()).unwrap();
        assert_eq!(result.epoch_seconds(), 42);
    }

    #[test]
    fn test_zero_is_the_epoch() {
        let result = interpret("0", &utc()).unwrap();
        assert_eq!(iso(&result.utc), "1970-01-01T00:00:00+00:00");
        assert_eq!(result.unit, TimestampUnit::Seconds);
    }

    #[test]
    fn test_threshold_boundary() {
        let below = interpret("99999999999", &utc()).unwrap();
        assert_eq!(below.unit, TimestampUnit::Seconds);
        assert_eq!(below.epoch_seconds(), 99_999_999_999);

        let at = interpret("100000000000", &utc()).unwrap();
        assert_eq!(at.unit, TimestampUnit::Milliseconds);
        assert_eq!(at.epoch_seconds(), 100_000_000);

        let negative = interpret("-100000000000", &utc()).unwrap();
        assert_eq!(negative.unit, TimestampUnit::Milliseconds);
    }

    #[test]
    fn test_negative_seconds_before_epoch() {
        let result = interpret("-86400", &utc()).unwrap();
        assert_eq!(iso(&result.utc), "1969-12-31T00:00:00+00:00");
        assert_eq!(result.epoch_seconds(), -86_400);
    }

    #[test]
    fn test_negative_millis_truncate_toward_zero() {
        let result = interpret("-100000001500", &utc()).unwrap();
        assert_eq!(result.unit, TimestampUnit::Milliseconds);
        assert_eq!(result.epoch_seconds(), -100_000_001);
        // The calendar rendering drops the fraction of the earlier second.
        assert_eq!(result.utc.timestamp(), -100_000_002);
        assert_eq!(result.utc.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_millis_keep_subsecond_precision() {
        let result = interpret("1700000000123", &utc()).unwrap();
        assert_eq!(result.utc.timestamp_subsec_millis(), 123);
        assert_eq!(iso(&result.utc), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            interpret("99999999999999999999", &utc()),
            Err(ParseError::OutOfRange(_))
        ));
        assert!(matches!(
            interpret("-99999999999999999999", &utc()),
            Err(ParseError::OutOfRange(_))
        ));
        // Fits in i64 but lands beyond the calendar once read as milliseconds.
        assert!(matches!(
            interpret(&i64::MAX.to_string(), &utc()),
            Err(ParseError::OutOfRange(_))
        ));
        assert!(matches!(
            interpret(&i64::MIN.to_string(), &utc()),
            Err(ParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_local_rendering_is_same_instant() {
        let offset = LocalOffset::from_seconds(-7 * 3600).unwrap();
        let result = interpret("1700000000", &offset).unwrap();
        assert_eq!(result.local.with_timezone(&Utc), result.utc);
        assert_eq!(iso(&result.local), "2023-11-14T15:13:20-07:00");
    }

    #[test]
    fn test_seconds_round_trip() {
        for n in [-2_000_000_000_i64, -1, 1, 86_399, 1_234_567_890, 4_102_444_800] {
            let result = interpret(&n.to_string(), &utc()).unwrap();
            assert_eq!(result.unit, TimestampUnit::Seconds);
            assert_eq!(result.utc.timestamp(), n);
            assert_eq!(result.epoch_seconds(), n);
        }
    }

    #[test]
    fn test_leading_plus_is_accepted() {
        assert_eq!(interpret("+60", &utc()).unwrap().epoch_seconds(), 60);
    }
}
