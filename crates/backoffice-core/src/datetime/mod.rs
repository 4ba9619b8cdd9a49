//! ISO 8601 combined date and time with local time zone.

use chrono::{Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

mod date;
mod time;

pub use date::Date;
pub use time::Time;

/// Alias for [`chrono::DateTime<Local>`](chrono::DateTime).
type LocalDateTime = chrono::DateTime<Local>;

/// A wrapper type for [`chrono::DateTime<Local>`](chrono::DateTime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct DateTime(LocalDateTime);

impl DateTime {
    /// Returns a new instance which corresponds to the current date.
    #[inline]
    pub fn now() -> Self {
        Self(Local::now())
    }

    /// Returns a new instance corresponding to a UTC date and time,
    /// from the number of non-leap seconds since the midnight UTC on January 1, 1970.
    ///
    /// Returns `None` if the timestamp is out of the representable range.
    #[inline]
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        chrono::DateTime::from_timestamp(secs, 0).map(|dt| Self(dt.with_timezone(&Local)))
    }

    /// Returns the number of non-leap seconds since the midnight UTC on January 1, 1970.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// Return an RFC 3339 and ISO 8601 date and time string with subseconds
    /// formatted as [`SecondsFormat::Millis`].
    #[inline]
    pub fn to_iso_string(&self) -> String {
        let datetime = self.0.with_timezone(&Utc);
        datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Returns a date-only string in the format `%Y-%m-%d`.
    #[inline]
    pub fn format_date(&self) -> String {
        format!("{}", self.0.format("%Y-%m-%d"))
    }

    /// Returns a time-only string in the format `%H:%M:%S`.
    #[inline]
    pub fn format_time(&self) -> String {
        format!("{}", self.0.format("%H:%M:%S"))
    }
}

impl fmt::Display for DateTime {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.6f %z"))
    }
}

impl Serialize for DateTime {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl From<LocalDateTime> for DateTime {
    #[inline]
    fn from(dt: LocalDateTime) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::DateTime;

    #[test]
    fn it_converts_timestamps() {
        let dt = DateTime::from_timestamp(1_709_300_730).unwrap();
        assert_eq!(dt.timestamp(), 1_709_300_730);
        assert_eq!(dt.to_iso_string(), "2024-03-01T13:45:30.000Z");
        assert_eq!(
            serde_json::to_value(dt).unwrap(),
            "2024-03-01T13:45:30.000Z"
        );

        assert!(DateTime::from_timestamp(i64::MAX).is_none());
        assert!(DateTime::from_timestamp(-99_999_999_999_999).is_none());
    }
}
