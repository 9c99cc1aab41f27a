use std::collections::HashMap;

/// Supplies localized month-name lookup tables, keyed by language code.
///
/// Implementations own their tables; the parser copies the table for its
/// configured language once at construction time and only reads it afterwards.
pub trait MonthNameProvider {
    /// Returns the table for a language code, mapping each localized month
    /// name to its month number (1 to 12). Names are matched by the parser
    /// case-insensitively and exactly, never by prefix.
    fn month_numbers(&self, language_code: &str) -> HashMap<String, u8>;
}

/// English month names with their common abbreviations.
const ENGLISH_MONTHS: &[(&str, u8)] = &[
    ("January", 1),
    ("February", 2),
    ("March", 3),
    ("April", 4),
    ("May", 5),
    ("June", 6),
    ("July", 7),
    ("August", 8),
    ("September", 9),
    ("October", 10),
    ("November", 11),
    ("December", 12),
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Sept", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

/// Month-name provider serving the English table for any language code.
///
/// This is the default wired into [`YearMonthParser::default`]; callers with
/// localized input supply their own [`MonthNameProvider`] instead.
///
/// [`YearMonthParser::default`]: crate::YearMonthParser
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMonthNames;

impl MonthNameProvider for EnglishMonthNames {
    fn month_numbers(&self, _language_code: &str) -> HashMap<String, u8> {
        ENGLISH_MONTHS
            .iter()
            .map(|&(name, number)| (name.to_owned(), number))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_table_contents() {
        let table = EnglishMonthNames.month_numbers("en");
        assert_eq!(table.len(), ENGLISH_MONTHS.len());
        assert_eq!(table.get("June"), Some(&6));
        assert_eq!(table.get("Sept"), Some(&9));
        assert_eq!(table.get("Dec"), Some(&12));
        assert_eq!(table.get("Zorktober"), None);
    }

    #[test]
    fn test_every_month_number_is_covered() {
        let table = EnglishMonthNames.month_numbers("en");
        for number in 1..=12 {
            assert!(
                table.values().any(|&n| n == number),
                "month {number} has no name"
            );
        }
    }

    #[test]
    fn test_table_does_not_depend_on_language_code() {
        assert_eq!(
            EnglishMonthNames.month_numbers("en"),
            EnglishMonthNames.month_numbers("de")
        );
    }
}
