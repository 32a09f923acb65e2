//! Day labels such as `"Thu 27 Nov"` carry no year. They are resolved against an anchor date
//! (the day the run started) to the next occurrence of that month/day on or after the anchor.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use tracing::warn;

use crate::DateParseError;

/// Shape check for day headers: `<3 letters> <number>[.] <anything>`.
/// Section headings like "Featured" or "Artists to see" fail it.
pub fn looks_like_day_header(text: &str) -> bool {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 3 {
        return false;
    }
    let day = parts[1].trim_end_matches('.');
    parts[0].chars().count() == 3 && !day.is_empty() && day.chars().all(|c| c.is_ascii_digit())
}

/// Resolves a day label to a calendar date.
///
/// The weekday token is display-only. If it disagrees with the resolved date it is logged,
/// not rejected.
pub fn resolve_day_label(label: &str, anchor: NaiveDate) -> Result<NaiveDate, DateParseError> {
    let tokens: Vec<&str> = label
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c == '.' || c == ','))
        .filter(|t| !t.is_empty())
        .collect();

    let day = tokens
        .iter()
        .find_map(|t| t.parse::<u32>().ok())
        .ok_or_else(|| DateParseError::MissingDay(label.to_string()))?;
    let month = tokens
        .iter()
        .find_map(|t| t.parse::<Month>().ok())
        .ok_or_else(|| DateParseError::MissingMonth(label.to_string()))?;

    let date = resolve_month_day(month.number_from_month(), day, anchor)?;

    if let Some(weekday) = tokens.first().and_then(|t| t.parse::<Weekday>().ok()) {
        if weekday != date.weekday() {
            warn!(
                label,
                %date,
                actual = %date.weekday(),
                "weekday in day label doesn't match the resolved date"
            );
        }
    }

    Ok(date)
}

/// Next occurrence of `month`/`day` on or after `anchor`.
/// A month/day that would fall before the anchor in the anchor's year rolls over
/// into the next year.
pub fn resolve_month_day(
    month: u32,
    day: u32,
    anchor: NaiveDate,
) -> Result<NaiveDate, DateParseError> {
    let year = if (month, day) < (anchor.month(), anchor.day()) {
        anchor.year() + 1
    } else {
        anchor.year()
    };
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateParseError::InvalidDate {
        year,
        month,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shape_check() {
        assert!(looks_like_day_header("Thu 27 Nov"));
        assert!(looks_like_day_header("Fri 5. Dec"));
        assert!(!looks_like_day_header("Featured"));
        assert!(!looks_like_day_header("Artists to see in Paris"));
        assert!(!looks_like_day_header("Thu 27"));
        assert!(!looks_like_day_header("Thursday 27 Nov"));
    }

    #[test]
    fn year_end_rollover() {
        let anchor = ymd(2025, 12, 29);
        assert_eq!(resolve_month_day(1, 5, anchor), Ok(ymd(2026, 1, 5)));
        assert_eq!(resolve_month_day(12, 31, anchor), Ok(ymd(2025, 12, 31)));
    }

    #[test]
    fn anchor_day_itself_keeps_the_year() {
        let anchor = ymd(2025, 11, 1);
        assert_eq!(resolve_month_day(11, 1, anchor), Ok(ymd(2025, 11, 1)));
        // Yesterday is next year's.
        assert_eq!(resolve_month_day(10, 31, anchor), Ok(ymd(2026, 10, 31)));
    }

    #[test]
    fn label_resolution() {
        let anchor = ymd(2025, 12, 29);
        assert_eq!(resolve_day_label("Mon 5 Jan", anchor), Ok(ymd(2026, 1, 5)));
        assert_eq!(resolve_day_label("Wed 31 Dec", anchor), Ok(ymd(2025, 12, 31)));
        assert_eq!(resolve_day_label("Wed 31. December", anchor), Ok(ymd(2025, 12, 31)));
    }

    #[test]
    fn wrong_weekday_is_ignored() {
        let anchor = ymd(2025, 11, 1);
        assert_eq!(resolve_day_label("Fri 3 Nov", anchor), Ok(ymd(2025, 11, 3)));
    }

    #[test]
    fn impossible_dates_fail() {
        let anchor = ymd(2025, 1, 10);
        assert_eq!(
            resolve_day_label("Mon 30 Feb", anchor),
            Err(DateParseError::InvalidDate {
                year: 2025,
                month: 2,
                day: 30
            })
        );
        assert!(matches!(
            resolve_day_label("Sat 29 Feb", anchor),
            Err(DateParseError::InvalidDate { .. })
        ));
        assert_eq!(resolve_day_label("Sat 29 Feb", ymd(2027, 3, 1)), Ok(ymd(2028, 2, 29)));
    }

    #[test]
    fn missing_parts_fail() {
        let anchor = ymd(2025, 1, 10);
        assert_eq!(
            resolve_day_label("Mon 3 Foo", anchor),
            Err(DateParseError::MissingMonth("Mon 3 Foo".into()))
        );
        assert_eq!(
            resolve_day_label("Mon Nov", anchor),
            Err(DateParseError::MissingDay("Mon Nov".into()))
        );
    }
}
