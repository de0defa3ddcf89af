use crate::parser::tabular::parse_date_token;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Today's calendar date in the given timezone
pub fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

/// Parse a date given on the command line.
/// Accepts ISO `2025-07-21` or the schedule style `21 Jul 25`.
pub fn parse_query_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_date_token(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 21);
        assert_eq!(parse_query_date("2025-07-21"), expected);
        assert_eq!(parse_query_date(" 21 Jul 25 "), expected);
        assert_eq!(parse_query_date("21/07/2025"), None);
        assert_eq!(parse_query_date(""), None);
    }

    #[test]
    fn test_today_in_is_near_utc() {
        let utc = Utc::now().date_naive();
        let local = today_in(chrono_tz::Asia::Kolkata);
        // Never more than a day apart
        assert!((local - utc).num_days().abs() <= 1);
    }
}
