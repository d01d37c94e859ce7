//! Normalization of fixes into timestamped coordinates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use thiserror::Error;

use crate::fix::FixRecord;

/// Raw coordinate units per degree.
pub const DEGREE_SCALE: f64 = 10_000_000.0;

/// An error normalizing a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The calendar fields do not form a valid date and time.
    #[error(
        "Invalid timestamp ({year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02})."
    )]
    InvalidTimestamp {
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    },
    /// The receiver did not flag both date and time as valid.
    #[error("Date and time are not confirmed valid by the receiver.")]
    UnconfirmedTime,
}

/// A latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Convert from integers in units of 1e-7 degrees.
    pub fn from_scaled(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude: latitude as f64 / DEGREE_SCALE,
            longitude: longitude as f64 / DEGREE_SCALE,
        }
    }
}

/// A fix reduced to when and where it was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time of the fix, in UTC, to the microsecond.
    pub timestamp: NaiveDateTime,
    pub coordinate: Coordinate,
}

impl Sample {
    /// The timestamp, tagged with its time zone.
    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        self.timestamp.and_utc()
    }
}

/// Normalize a fix into a sample.
///
/// The nanosecond field is truncated to whole microseconds and added to the
/// calendar time, and may move it backward. Invalid calendar fields are
/// rejected rather than clamped. Coordinates are not range-checked.
pub fn normalize(fix: FixRecord) -> Result<Sample, SampleError> {
    let invalid = SampleError::InvalidTimestamp {
        year: fix.year,
        month: fix.month,
        day: fix.day,
        hour: fix.hour,
        minute: fix.minute,
        second: fix.second,
    };

    // Calendar years outside 1..=9999 are not representable as dates.
    if !(1..=9999).contains(&fix.year) {
        return Err(invalid);
    }

    let date = NaiveDate::from_ymd_opt(fix.year.into(), fix.month.into(), fix.day.into());
    let time = NaiveTime::from_hms_opt(fix.hour.into(), fix.minute.into(), fix.second.into());

    let (Some(date), Some(time)) = (date, time) else {
        return Err(invalid);
    };

    let offset = TimeDelta::microseconds(i64::from(fix.nano) / 1000);
    let timestamp = date.and_time(time).checked_add_signed(offset).ok_or(invalid)?;

    Ok(Sample {
        timestamp,
        coordinate: Coordinate::from_scaled(fix.latitude, fix.longitude),
    })
}

/// Normalize a fix into a sample, additionally requiring that the receiver
/// flagged its date and time as valid.
pub fn normalize_confirmed(fix: FixRecord) -> Result<Sample, SampleError> {
    if !(fix.validity.valid_date && fix.validity.valid_time) {
        Err(SampleError::UnconfirmedTime)?;
    }

    normalize(fix)
}
