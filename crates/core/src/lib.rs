//! Core units, constants, and shared primitives for the ferry battery planner workspace.

/// Time and energy constants.
pub mod constants {
    /// Minutes per hour.
    pub const MINUTES_PER_HOUR: f64 = 60.0;
    /// Minutes per day.
    pub const MINUTES_PER_DAY: u32 = 1_440;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::MINUTES_PER_HOUR;

    /// Convert a percent input (e.g. `20`) into a fraction (`0.2`).
    #[inline]
    pub fn percent_to_fraction(v: f64) -> f64 {
        v / 100.0
    }

    /// Convert hours to minutes.
    #[inline]
    pub fn hours_to_minutes(hours: f64) -> f64 {
        hours * MINUTES_PER_HOUR
    }

    /// Convert minutes to hours.
    #[inline]
    pub fn minutes_to_hours(minutes: f64) -> f64 {
        minutes / MINUTES_PER_HOUR
    }

    /// Round to two decimals, the precision every capacity is reported in.
    #[inline]
    pub fn round2(v: f64) -> f64 {
        (v * 100.0).round() / 100.0
    }
}

/// Wall-clock time of day.
pub mod time {
    use std::fmt;
    use std::str::FromStr;

    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use thiserror::Error;

    use super::constants::MINUTES_PER_DAY;
    use super::units::hours_to_minutes;

    /// Minutes since midnight.
    ///
    /// Addition never wraps, so a trip that ends after midnight stays ordered
    /// after the trips before it. Only [`fmt::Display`] folds the value back
    /// into a 24 hour clock.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct ClockTime(u32);

    /// Failure to read an `HH:MM` string.
    #[derive(Debug, Error, PartialEq, Eq)]
    #[error("'{0}' is not a valid HH:MM time of day")]
    pub struct ClockTimeError(pub String);

    impl ClockTime {
        pub const MIDNIGHT: ClockTime = ClockTime(0);

        pub fn from_minutes(minutes: u32) -> Self {
            Self(minutes)
        }

        pub fn from_hm(hours: u32, minutes: u32) -> Self {
            Self(hours * 60 + minutes)
        }

        pub fn minutes(self) -> u32 {
            self.0
        }

        /// Advance by a duration in hours, rounded to the nearest whole minute.
        pub fn add_hours(self, hours: f64) -> Self {
            let delta = hours_to_minutes(hours).round();
            if delta <= 0.0 {
                return self;
            }
            Self(self.0.saturating_add(delta as u32))
        }

        /// Signed minutes from `self` until `later`.
        pub fn minutes_until(self, later: ClockTime) -> i64 {
            i64::from(later.0) - i64::from(self.0)
        }

        /// Whole days elapsed since the start of the simulated day.
        pub fn day_offset(self) -> u32 {
            self.0 / MINUTES_PER_DAY
        }

        /// Minutes into the current day, after removing [`ClockTime::day_offset`].
        pub fn minute_of_day(self) -> u32 {
            self.0 % MINUTES_PER_DAY
        }
    }

    impl fmt::Display for ClockTime {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let m = self.minute_of_day();
            write!(f, "{:02}:{:02}", m / 60, m % 60)
        }
    }

    impl FromStr for ClockTime {
        type Err = ClockTimeError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let trimmed = s.trim();
            let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
                .map_err(|_| ClockTimeError(s.to_string()))?;
            Ok(Self::from_hm(parsed.hour(), parsed.minute()))
        }
    }

    impl Serialize for ClockTime {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for ClockTime {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(deserializer)?;
            raw.parse().map_err(serde::de::Error::custom)
        }
    }
}

pub use time::ClockTime;
