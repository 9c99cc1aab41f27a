use std::cmp::Ordering;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::prelude::*;
use crate::types::{Day, Month, Precision, Year};
use crate::ParseError;

/// Shape of a canonical timestamp literal: an explicit sign, year digits,
/// two-digit month and day, and a time fixed to midnight UTC. Unspecified
/// components are written as zeros.
static TIMESTAMP_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>[+-])(?P<year>[0-9]+)-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})T00:00:00Z$")
        .expect("hard-coded timestamp pattern compiles")
});

/// A calendar timestamp tagged with the precision at which it is meaningful.
/// Components below the precision are unspecified, not zero-filled data.
///
/// Displays as the canonical literal the value was built from, e.g.
/// `+2013-06-00T00:00:00Z` for June 2013 at month precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TimeValue {
    /// Year, month and day are all specified
    #[display(fmt = "{}-{:02}-{:02}T00:00:00Z", "year", "month.get()", "day.get()")]
    Day { year: Year, month: Month, day: Day },
    /// Year and month only
    #[display(fmt = "{}-{:02}-00T00:00:00Z", "year", "month.get()")]
    Month { year: Year, month: Month },
    /// Year only
    #[display(fmt = "{}-00-00T00:00:00Z", "year")]
    Year { year: Year },
}

impl TimeValue {
    /// Returns the year component (always present)
    pub const fn year(&self) -> Year {
        match *self {
            Self::Day { year, .. } | Self::Month { year, .. } | Self::Year { year } => year,
        }
    }

    /// Returns the month component if specified
    pub const fn month(&self) -> Option<Month> {
        match *self {
            Self::Day { month, .. } | Self::Month { month, .. } => Some(month),
            Self::Year { .. } => None,
        }
    }

    /// Returns the day component if specified
    pub const fn day(&self) -> Option<Day> {
        match *self {
            Self::Day { day, .. } => Some(day),
            Self::Month { .. } | Self::Year { .. } => None,
        }
    }

    /// Returns the precision this value is meaningful at
    pub const fn precision(&self) -> Precision {
        match self {
            Self::Day { .. } => Precision::Day,
            Self::Month { .. } => Precision::Month,
            Self::Year { .. } => Precision::Year,
        }
    }

    /// Key used for ordering: earliest concrete date this value can denote,
    /// then precision (less precise comes first) to break ties.
    fn sort_key(&self) -> (i64, u8, u8, u8) {
        match *self {
            Self::Day { year, month, day } => (year.get(), month.get(), day.get(), 2),
            Self::Month { year, month } => (year.get(), month.get(), 0, 1),
            Self::Year { year } => (year.get(), 0, 0, 0),
        }
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl FromStr for TimeValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IsoTimestampParser::new().parse(s)
    }
}

impl serde::Serialize for TimeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for TimeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Builds [`TimeValue`]s from canonical timestamp literals such as
/// `+2013-06-00T00:00:00Z`.
///
/// Precision is inferred from the zero components: a `00` month means year
/// precision and a `00` day means month precision. A day without a month is
/// rejected, as is any time other than midnight UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoTimestampParser;

impl IsoTimestampParser {
    pub const fn new() -> Self {
        Self
    }

    /// Parses a canonical timestamp literal into a [`TimeValue`].
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTimestamp` when the literal does not have
    /// the canonical shape, `ParseError::InvalidYear` when the year digits
    /// overflow, and `ParseError::InvalidMonth`/`ParseError::InvalidDay` when
    /// a component is out of range.
    pub fn parse(&self, literal: &str) -> Result<TimeValue, ParseError> {
        let caps = TIMESTAMP_FORMAT
            .captures(literal)
            .ok_or_else(|| ParseError::InvalidTimestamp(literal.to_owned()))?;

        let digits = &caps["year"];
        let magnitude: i64 = digits
            .parse()
            .map_err(|_| ParseError::InvalidYear(digits.to_owned()))?;
        let year = if &caps["sign"] == "-" {
            Year::new(-magnitude)
        } else {
            Year::new(magnitude)
        };

        let month: u8 = caps["month"]
            .parse()
            .map_err(|_| ParseError::InvalidTimestamp(literal.to_owned()))?;
        let day: u8 = caps["day"]
            .parse()
            .map_err(|_| ParseError::InvalidTimestamp(literal.to_owned()))?;

        match (month, day) {
            (0, 0) => Ok(TimeValue::Year { year }),
            (_, 0) => Ok(TimeValue::Month {
                year,
                month: Month::new(month)?,
            }),
            // A specified day under an unspecified month is meaningless.
            (0, _) => Err(ParseError::InvalidTimestamp(literal.to_owned())),
            (..) => Ok(TimeValue::Day {
                year,
                month: Month::new(month)?,
                day: Day::new(day, year.get(), month)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_precision() {
        let value = IsoTimestampParser::new()
            .parse("+2013-06-00T00:00:00Z")
            .unwrap();
        assert_eq!(
            value,
            TimeValue::Month {
                year: Year::new(2013),
                month: Month::new(6).unwrap()
            }
        );
        assert_eq!(value.precision(), Precision::Month);
        assert_eq!(value.year().get(), 2013);
        assert_eq!(value.month().map(Month::get), Some(6));
        assert_eq!(value.day(), None);
    }

    #[test]
    fn test_parse_year_precision() {
        let value = IsoTimestampParser::new()
            .parse("+1991-00-00T00:00:00Z")
            .unwrap();
        assert_eq!(
            value,
            TimeValue::Year {
                year: Year::new(1991)
            }
        );
        assert_eq!(value.precision(), Precision::Year);
        assert_eq!(value.month(), None);
    }

    #[test]
    fn test_parse_day_precision() {
        let value = IsoTimestampParser::new()
            .parse("+2020-02-29T00:00:00Z")
            .unwrap();
        assert_eq!(value.precision(), Precision::Day);
        assert_eq!(value.day().map(Day::get), Some(29));

        // 2021 is not a leap year
        let result = IsoTimestampParser::new().parse("+2021-02-29T00:00:00Z");
        assert!(matches!(result, Err(ParseError::InvalidDay { .. })));
    }

    #[test]
    fn test_parse_negative_year() {
        let value = IsoTimestampParser::new()
            .parse("-0044-03-00T00:00:00Z")
            .unwrap();
        assert_eq!(value.year().get(), -44);
        assert_eq!(value.month().map(Month::get), Some(3));
    }

    #[test]
    fn test_invalid_month() {
        let result = IsoTimestampParser::new().parse("+2013-13-00T00:00:00Z");
        assert!(matches!(result, Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_day_without_month_is_rejected() {
        let result = IsoTimestampParser::new().parse("+2013-00-15T00:00:00Z");
        assert!(matches!(result, Err(ParseError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_malformed_literals_are_rejected() {
        let parser = IsoTimestampParser::new();
        for literal in [
            "2013-06-00T00:00:00Z",     // missing sign
            "+2013-6-00T00:00:00Z",     // month not two digits
            "+2013-06-00T01:00:00Z",    // not midnight
            "+2013-06-00T00:00:00",     // missing zone
            "+2013-06-00T00:00:00Z ",   // trailing junk
            "--100-10-00T00:00:00Z",    // doubled sign
            "+-100-10-00T00:00:00Z",    // conflicting signs
            "June 2013",
            "",
        ] {
            assert!(
                matches!(parser.parse(literal), Err(ParseError::InvalidTimestamp(_))),
                "literal {literal:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_year_overflow() {
        let result = IsoTimestampParser::new().parse("+99999999999999999999-00-00T00:00:00Z");
        assert!(matches!(result, Err(ParseError::InvalidYear(_))));
    }

    #[test]
    fn test_display_round_trip() {
        let parser = IsoTimestampParser::new();
        for literal in [
            "+2013-06-00T00:00:00Z",
            "-2013-06-00T00:00:00Z",
            "+0010-12-00T00:00:00Z",
            "-0044-00-00T00:00:00Z",
            "+1991-08-15T00:00:00Z",
        ] {
            let value = parser.parse(literal).unwrap();
            assert_eq!(value.to_string(), literal);
            assert_eq!(parser.parse(&value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn test_ordering() {
        let parser = IsoTimestampParser::new();
        let bce = parser.parse("-0100-01-00T00:00:00Z").unwrap();
        let ce = parser.parse("+0100-01-00T00:00:00Z").unwrap();
        assert!(bce < ce);

        // Same lower bound, less precise comes first.
        let year = parser.parse("+1991-00-00T00:00:00Z").unwrap();
        let month = parser.parse("+1991-01-00T00:00:00Z").unwrap();
        let day = parser.parse("+1991-01-01T00:00:00Z").unwrap();
        assert!(year < month);
        assert!(month < day);
    }

    #[test]
    fn test_serde_string_format() {
        let value = IsoTimestampParser::new()
            .parse("-2013-06-00T00:00:00Z")
            .unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""-2013-06-00T00:00:00Z""#);

        let parsed: TimeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, parsed);
    }

    #[test]
    fn test_serde_validation() {
        let result: Result<TimeValue, _> = serde_json::from_str(r#""+2013-13-00T00:00:00Z""#);
        assert!(result.is_err());

        let result: Result<TimeValue, _> = serde_json::from_str(r#""not a timestamp""#);
        assert!(result.is_err());
    }
}
