use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// Number of calendar days between `date` and `today`.
///
/// The time of day is ignored. Dates in the future result in negative values.
#[must_use]
pub fn days_since(date: Option<NaiveDateTime>, today: NaiveDate) -> Option<i64> {
    date.map(|d| (today - d.date()).num_days())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plural {
    One,
    Other,
}

impl From<i64> for Plural {
    fn from(value: i64) -> Self {
        if value == 1 { Plural::One } else { Plural::Other }
    }
}

/// Human-readable distance of `date` from `today`.
///
/// The texts are supplied by the caller, so that they can be localized.
pub fn relative_label(
    date: Option<NaiveDateTime>,
    today: NaiveDate,
    never: &str,
    today_text: &str,
    days_ago: impl Fn(i64, Plural) -> String,
) -> String {
    match days_since(date, today) {
        None => never.to_string(),
        Some(0) => today_text.to_string(),
        Some(days) => days_ago(days, Plural::from(days)),
    }
}

/// Most recent Sunday on or before `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{date, dt};

    use super::*;

    #[rstest]
    #[case::absent(None, None)]
    #[case::today_morning(Some(dt(2024, 5, 15, 0, 0)), Some(0))]
    #[case::today_evening(Some(dt(2024, 5, 15, 23, 59)), Some(0))]
    #[case::yesterday_late(Some(dt(2024, 5, 14, 23, 59)), Some(1))]
    #[case::last_week(Some(dt(2024, 5, 8, 12, 0)), Some(7))]
    #[case::tomorrow(Some(dt(2024, 5, 16, 8, 0)), Some(-1))]
    fn test_days_since(#[case] input: Option<NaiveDateTime>, #[case] expected: Option<i64>) {
        assert_eq!(days_since(input, date(2024, 5, 15)), expected);
    }

    #[test]
    fn test_days_since_crossing_midnight() {
        // Less than 24 hours apart, but on different calendar days.
        assert_eq!(days_since(Some(dt(2024, 5, 14, 23, 30)), date(2024, 5, 15)), Some(1));
    }

    #[rstest]
    #[case(None, "never")]
    #[case(Some(dt(2024, 5, 15, 9, 0)), "today")]
    #[case(Some(dt(2024, 5, 14, 9, 0)), "1 day ago")]
    #[case(Some(dt(2024, 5, 12, 9, 0)), "3 days ago")]
    #[case(Some(dt(2024, 5, 17, 9, 0)), "-2 days ago")]
    fn test_relative_label(#[case] input: Option<NaiveDateTime>, #[case] expected: &str) {
        assert_eq!(
            relative_label(input, date(2024, 5, 15), "never", "today", |n, plural| {
                match plural {
                    Plural::One => format!("{n} day ago"),
                    Plural::Other => format!("{n} days ago"),
                }
            }),
            expected
        );
    }

    #[rstest]
    #[case::sunday(date(2024, 5, 12), date(2024, 5, 12))]
    #[case::wednesday(date(2024, 5, 15), date(2024, 5, 12))]
    #[case::saturday(date(2024, 5, 18), date(2024, 5, 12))]
    #[case::across_months(date(2024, 6, 1), date(2024, 5, 26))]
    fn test_start_of_week(#[case] input: NaiveDate, #[case] expected: NaiveDate) {
        assert_eq!(start_of_week(input), expected);
    }
}
