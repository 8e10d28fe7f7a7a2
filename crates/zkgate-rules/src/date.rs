use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use zkgate_core::decode_bytes;

use crate::error::RuleError;

/// Layout of date signals: the bytes of the field element spell `YYMMDD`.
const SIGNAL_DATE_FORMAT: &str = "%y%m%d";

/// Decode a date signal into a calendar date.
pub fn parse_signal_date(value: &str) -> Result<NaiveDate, RuleError> {
    let bytes = decode_bytes(value).map_err(|e| RuleError::InvalidDate(e.to_string()))?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| RuleError::InvalidDate(format!("non-text bytes {:02x?}", bytes)))?;
    NaiveDate::parse_from_str(text, SIGNAL_DATE_FORMAT)
        .map_err(|e| RuleError::InvalidDate(format!("{:?}: {}", text, e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Before,
    After,
    SameDay,
}

/// Compares a date signal against a point in time. The signal date is taken
/// at midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRule {
    point: DateTime<Utc>,
    comparison: Comparison,
}

impl DateRule {
    /// The signal date must not be later than `point`.
    pub fn before(point: DateTime<Utc>) -> Self {
        Self {
            point,
            comparison: Comparison::Before,
        }
    }

    /// The signal date must not be earlier than `point`.
    pub fn after(point: DateTime<Utc>) -> Self {
        Self {
            point,
            comparison: Comparison::After,
        }
    }

    /// The signal date must be the calendar day of `point`; time of day is
    /// ignored.
    pub fn same_day(point: DateTime<Utc>) -> Self {
        Self {
            point,
            comparison: Comparison::SameDay,
        }
    }

    pub fn validate(&self, value: &str) -> Result<(), RuleError> {
        if value.is_empty() {
            return Err(RuleError::Required);
        }

        let date = parse_signal_date(value)?;
        let at = date.and_time(NaiveTime::MIN).and_utc();

        match self.comparison {
            Comparison::SameDay if date != self.point.date_naive() => Err(RuleError::DatesNotEqual),
            Comparison::Before if at > self.point => Err(RuleError::TooLate),
            Comparison::After if at < self.point => Err(RuleError::TooEarly),
            _ => Ok(()),
        }
    }
}
