use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Sign;

/// Matches the "before the epoch" marker family as a trailing token: "BC",
/// "B.C.", "B C", "BCE", "B.C.E." and the spelled-out "Before Common Era".
/// No word boundary is required before the marker, so "100BC" also matches.
static BEFORE_EPOCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:B\.?\s*C\.?(?:\s*E\.?)?|Before\s+Common\s+Era)\s*$")
        .expect("hard-coded era pattern compiles")
});

/// Matches the "after the epoch" marker family as a trailing token: "AD",
/// "A.D.", "A. D.", "CE", "C.E." and the spelled-out "Common Era".
static AFTER_EPOCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:A\.?\s*D\.?|C\.?\s*E\.?|Common\s+Era)\s*$")
        .expect("hard-coded era pattern compiles")
});

/// Outcome of an era scan: the sign the marker implies and the input with the
/// marker removed. When no marker was present the sign is `Positive` and the
/// remainder is the trimmed input, unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraToken<'a> {
    sign: Sign,
    remainder: &'a str,
}

impl<'a> EraToken<'a> {
    /// The sign implied by the detected marker, `Positive` if none was found.
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// The input with the marker and surrounding whitespace stripped.
    pub const fn remainder(&self) -> &'a str {
        self.remainder
    }
}

/// Detects a trailing era marker (BC/BCE/AD/CE or a spelled-out equivalent)
/// and reports the sign it implies, independent of any year or month parsing.
///
/// Absence of a marker is not an error. Callers that accept an explicit
/// leading `+`/`-` must check for it themselves and skip this parser: a digit
/// sign and a textual era marker are mutually exclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct EraParser;

impl EraParser {
    pub const fn new() -> Self {
        Self
    }

    /// Scans `value` for a trailing era marker. The "before" family maps to
    /// [`Sign::Negative`], the "after" family to [`Sign::Positive`].
    pub fn parse<'a>(&self, value: &'a str) -> EraToken<'a> {
        let trimmed = value.trim();
        // BCE ends in the "after" marker CE, so the "before" family is
        // checked first.
        if let Some(marker) = BEFORE_EPOCH.find(trimmed) {
            EraToken {
                sign: Sign::Negative,
                remainder: trimmed[..marker.start()].trim_end(),
            }
        } else if let Some(marker) = AFTER_EPOCH.find(trimmed) {
            EraToken {
                sign: Sign::Positive,
                remainder: trimmed[..marker.start()].trim_end(),
            }
        } else {
            EraToken {
                sign: Sign::Positive,
                remainder: trimmed,
            }
        }
    }
}
