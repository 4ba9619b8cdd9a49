use chrono::{format::ParseError, NaiveTime, Timelike};
use std::{fmt, str::FromStr};

/// A wrapper type for [`chrono::NaiveTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(NaiveTime);

impl Time {
    /// Returns the number of non-leap milliseconds past the last midnight.
    #[inline]
    pub fn num_millis_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() * 1000 + self.0.nanosecond() / 1_000_000
    }
}

impl fmt::Display for Time {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.f"))
    }
}

impl From<NaiveTime> for Time {
    #[inline]
    fn from(t: NaiveTime) -> Self {
        Self(t)
    }
}

impl FromStr for Time {
    type Err = ParseError;

    /// Parses a time in the `%H:%M:%S` format, where the seconds are optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;
    use chrono::NaiveTime;

    #[test]
    fn it_parses_time() {
        let time = "13:45:30".parse::<Time>().unwrap();
        assert_eq!(time.num_millis_from_midnight(), 49_530_000);
        assert_eq!(time.to_string(), "13:45:30");

        let time = "13:45".parse::<Time>().unwrap();
        assert_eq!(time.num_millis_from_midnight(), 49_500_000);
        assert_eq!(Time::from(NaiveTime::default()).num_millis_from_midnight(), 0);

        assert!("25:00".parse::<Time>().is_err());
        assert!("13".parse::<Time>().is_err());
        assert!("noon".parse::<Time>().is_err());
    }
}
