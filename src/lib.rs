mod consts;
mod era;
mod months;
mod prelude;
mod timestamp;
mod types;

pub use consts::*;
pub use era::{EraParser, EraToken};
pub use months::{EnglishMonthNames, MonthNameProvider};
pub use timestamp::{IsoTimestampParser, TimeValue};
pub use types::{Day, Month, Precision, Sign, Year};

use crate::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Matches a year and a month separated by a single date separator (slash,
/// hyphen, whitespace, dot or comma). Tokens are runs of digits or letters;
/// a leading minus is accepted here and validated during classification.
static YEAR_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?[0-9\p{L}]+)\s*?[/\-\s.,]\s*(-?[0-9\p{L}]+)$")
        .expect("hard-coded year-month pattern compiles")
});

/// Errors raised while validating calendar components and canonical
/// timestamp literals.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid timestamp literal: {_0}")]
    InvalidTimestamp(String),
    #[display(fmt = "Invalid year: {_0}")]
    InvalidYear(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: i64 },
}

impl std::error::Error for ParseError {}

/// Error returned by [`YearMonthParser::parse`].
///
/// Disambiguation failures all collapse into the single `Unparseable`
/// category; failures raised by the timestamp constructor pass through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearMonthError {
    #[error("failed to parse {input:?} as {format}")]
    Unparseable { input: String, format: &'static str },
    #[error(transparent)]
    Timestamp(#[from] ParseError),
}

impl YearMonthError {
    fn unparseable(input: &str) -> Self {
        Self::Unparseable {
            input: input.to_owned(),
            format: FORMAT_NAME,
        }
    }
}

/// Where the sign of the year came from. Decided once at the top of a parse,
/// so the explicit-sign and era-marker paths can never both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignSource {
    /// A leading `+`/`-` character, stripped before tokenization.
    Explicit(Sign),
    /// A textual era marker consumed by [`EraParser`].
    EraMarker(Sign),
    /// Neither; the year defaults to positive.
    Unspecified,
}

impl SignSource {
    const fn sign(self) -> Option<Sign> {
        match self {
            Self::Explicit(sign) | Self::EraMarker(sign) => Some(sign),
            Self::Unspecified => None,
        }
    }
}

/// Parses freeform year-month dates such as `12/10`, `June 2013` or
/// `June 2013 BCE` into a [`TimeValue`], normally at month precision.
///
/// Prefers month/year order when both numbers are valid months, so `12/10`
/// is December of the year 10. Callers that also accept plain years should
/// try this parser before a year-only one: a string like `1 999` may be a
/// month and a year or a single year with digit grouping.
#[derive(Debug, Clone)]
pub struct YearMonthParser {
    /// Localized month names mapped to month numbers, keys lowercased.
    month_numbers: HashMap<String, u8>,
    era_parser: EraParser,
    timestamp_parser: IsoTimestampParser,
}

impl YearMonthParser {
    /// Creates a parser using the month-name table the provider supplies for
    /// `language_code`. The table is copied once and only read afterwards.
    pub fn new(month_name_provider: &dyn MonthNameProvider, language_code: &str) -> Self {
        let month_numbers = month_name_provider
            .month_numbers(language_code)
            .into_iter()
            .map(|(name, number)| (name.to_lowercase(), number))
            .collect();

        Self {
            month_numbers,
            era_parser: EraParser::new(),
            timestamp_parser: IsoTimestampParser::new(),
        }
    }

    /// Parses `value` into a [`TimeValue`].
    ///
    /// # Errors
    /// Returns [`YearMonthError::Unparseable`] when no year-month reading of
    /// the input survives disambiguation, and propagates timestamp
    /// constructor failures unchanged.
    pub fn parse(&self, value: &str) -> Result<TimeValue, YearMonthError> {
        let trimmed = value.trim();

        let (sign_source, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
            // An explicit digit sign and a textual era marker are mutually
            // exclusive; the era parser must not see this string.
            (SignSource::Explicit(Sign::Positive), rest)
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (SignSource::Explicit(Sign::Negative), rest)
        } else {
            let era = self.era_parser.parse(trimmed);
            if era.remainder() == trimmed {
                (SignSource::Unspecified, trimmed)
            } else {
                (SignSource::EraMarker(era.sign()), era.remainder())
            }
        };

        let caps = YEAR_MONTH
            .captures(rest)
            .ok_or_else(|| YearMonthError::unparseable(value))?;
        let (first, second) = (&caps[1], &caps[2]);

        // Once an era marker has fixed the sign, a signed token is illegal.
        let allow_signed = !matches!(sign_source, SignSource::EraMarker(_));
        let first_is_int = is_integer(first, allow_signed);
        let second_is_int = is_integer(second, allow_signed);

        let sign = sign_source.sign();
        match (first_is_int, second_is_int) {
            (true, true) => {
                // Month/day-style ordering wins: the first token takes the
                // month role when both qualify.
                if let Some(month) = month_number(first) {
                    self.time_from_year_month(sign, second, month)
                } else if let Some(month) = month_number(second) {
                    self.time_from_year_month(sign, first, month)
                } else {
                    Err(YearMonthError::unparseable(value))
                }
            }
            (true, false) => match self.parse_month(second) {
                Some(month) => self.time_from_year_month(sign, first, month),
                None => Err(YearMonthError::unparseable(value)),
            },
            (false, true) => match self.parse_month(first) {
                Some(month) => self.time_from_year_month(sign, second, month),
                None => Err(YearMonthError::unparseable(value)),
            },
            (false, false) => Err(YearMonthError::unparseable(value)),
        }
    }

    /// Case-insensitive exact lookup in the month-name table.
    fn parse_month(&self, token: &str) -> Option<u8> {
        self.month_numbers.get(&token.to_lowercase()).copied()
    }

    /// Composes the canonical literal for the signed year and month and hands
    /// it to the timestamp constructor. The day is left unspecified and the
    /// time fixed at midnight UTC.
    fn time_from_year_month(
        &self,
        sign: Option<Sign>,
        year: &str,
        month: u8,
    ) -> Result<TimeValue, YearMonthError> {
        let mut year = match sign {
            Some(sign) => format!("{sign}{year}"),
            None => year.to_owned(),
        };
        if !year.starts_with(['+', '-']) {
            year.insert(0, '+');
        }

        let literal = format!("{year}-{month:02}-00{MIDNIGHT_UTC}");
        Ok(self.timestamp_parser.parse(&literal)?)
    }
}

impl Default for YearMonthParser {
    fn default() -> Self {
        Self::new(&EnglishMonthNames, "en")
    }
}

// --- token classification helpers ---

/// A token is numeric when it is all digits, with a leading minus permitted
/// only while `allow_signed` holds.
fn is_integer(token: &str, allow_signed: bool) -> bool {
    let digits = match token.strip_prefix('-') {
        Some(rest) => {
            if !allow_signed {
                return false;
            }
            rest
        }
        None => token,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// A numeric token can stand for a month when it is unsigned and its value is
/// at most 12. Zero is allowed through; the timestamp constructor treats a
/// `00` month as "unspecified" and drops to year precision.
fn month_number(token: &str) -> Option<u8> {
    if token.starts_with('-') {
        return None;
    }
    let value: u64 = token.parse().ok()?;
    u8::try_from(value).ok().filter(|&v| v <= MAX_MONTH)
}
