use chrono::{format::ParseError, NaiveDate};
use std::{fmt, str::FromStr};

/// A wrapper type for [`chrono::NaiveDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Counts the days from the 1st of January 1970.
    #[inline]
    pub fn num_days_from_epoch(&self) -> i64 {
        let unix_epoch = NaiveDate::default();
        self.0.signed_duration_since(unix_epoch).num_days()
    }

    /// Returns the number of seconds from the midnight UTC on January 1, 1970
    /// to the start of this date.
    #[inline]
    pub fn num_secs_from_epoch(&self) -> i64 {
        self.num_days_from_epoch() * 86_400
    }
}

impl fmt::Display for Date {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    #[inline]
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::Date;
    use chrono::NaiveDate;

    #[test]
    fn it_counts_days_from_epoch() {
        let date = "2024-03-01".parse::<Date>().unwrap();
        assert_eq!(date.num_days_from_epoch(), 19_783);
        assert_eq!(date.num_secs_from_epoch(), 1_709_251_200);
        assert_eq!(date.to_string(), "2024-03-01");
        assert_eq!(Date::from(NaiveDate::default()).num_days_from_epoch(), 0);
        assert!("2023-02-29".parse::<Date>().is_err());
        assert!("2024-13-01".parse::<Date>().is_err());
        assert!("abcd".parse::<Date>().is_err());
    }
}
