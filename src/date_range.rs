use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

/// Symbolic time-range selector as sent by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Today,
    Yesterday,
    Last7Days,
    Last14Days,
    Last30Days,
    Last60Days,
    Last90Days,
    Last6Months,
    LastYear,
    ThisMonth,
    LastMonth,
    ThisYear,
}

impl TimeRange {
    /// Unrecognized selectors fall back to the 7-day default.
    pub fn parse(s: &str) -> Self {
        match s {
            "today" => TimeRange::Today,
            "yesterday" => TimeRange::Yesterday,
            "7d" => TimeRange::Last7Days,
            "14d" => TimeRange::Last14Days,
            "30d" => TimeRange::Last30Days,
            "60d" => TimeRange::Last60Days,
            "90d" => TimeRange::Last90Days,
            "6m" => TimeRange::Last6Months,
            "1y" => TimeRange::LastYear,
            "thisMonth" => TimeRange::ThisMonth,
            "lastMonth" => TimeRange::LastMonth,
            "thisYear" => TimeRange::ThisYear,
            _ => TimeRange::Last7Days,
        }
    }
}

/// Inclusive calendar-date bounds, no time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Maps a selector to concrete dates. Rolling windows end at yesterday so
/// the window never includes a partial day; only `today`/`yesterday` pin the
/// literal day. `today` is injected by the caller rather than read from a
/// global clock.
pub fn resolve(range: TimeRange, today: NaiveDate) -> DateRange {
    let yesterday = today - Duration::days(1);

    let (start_date, end_date) = match range {
        TimeRange::Today => (today, today),
        TimeRange::Yesterday => (yesterday, yesterday),
        TimeRange::Last7Days => (yesterday - Duration::days(6), yesterday),
        TimeRange::Last14Days => (yesterday - Duration::days(13), yesterday),
        TimeRange::Last30Days => (yesterday - Duration::days(29), yesterday),
        TimeRange::Last60Days => (yesterday - Duration::days(59), yesterday),
        TimeRange::Last90Days => (yesterday - Duration::days(89), yesterday),
        // Months subtraction clamps the day-of-month when the target month
        // is shorter (e.g. Aug 31 - 6 months = Feb 28/29).
        TimeRange::Last6Months => (yesterday - Months::new(6), yesterday),
        TimeRange::LastYear => (yesterday - Months::new(12), yesterday),
        TimeRange::ThisMonth => (first_of_month(today), yesterday),
        TimeRange::LastMonth => {
            let end = first_of_month(today) - Duration::days(1);
            (first_of_month(end), end)
        }
        TimeRange::ThisYear => (first_of_year(today), yesterday),
    };

    // On the first day of a month/year the calendar kinds would invert
    // (yesterday falls before the period start); clamp to a single day.
    let start_date = start_date.min(end_date);

    DateRange {
        start_date,
        end_date,
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_and_yesterday_pin_the_literal_day() {
        let now = date(2024, 1, 15);
        assert_eq!(
            resolve(TimeRange::Today, now),
            DateRange {
                start_date: date(2024, 1, 15),
                end_date: date(2024, 1, 15),
            }
        );
        assert_eq!(
            resolve(TimeRange::Yesterday, now),
            DateRange {
                start_date: date(2024, 1, 14),
                end_date: date(2024, 1, 14),
            }
        );
    }

    #[test]
    fn seven_days_spans_seven_inclusive_days_ending_yesterday() {
        let resolved = resolve(TimeRange::Last7Days, date(2024, 1, 15));
        assert_eq!(resolved.start_date, date(2024, 1, 8));
        assert_eq!(resolved.end_date, date(2024, 1, 14));
    }

    #[test]
    fn rolling_windows_end_at_yesterday() {
        let now = date(2024, 5, 20);
        for range in [
            TimeRange::Last7Days,
            TimeRange::Last14Days,
            TimeRange::Last30Days,
            TimeRange::Last60Days,
            TimeRange::Last90Days,
            TimeRange::Last6Months,
            TimeRange::LastYear,
            TimeRange::ThisMonth,
            TimeRange::ThisYear,
        ] {
            let resolved = resolve(range, now);
            assert_eq!(resolved.end_date, date(2024, 5, 19), "{range:?}");
            assert!(resolved.start_date <= resolved.end_date, "{range:?}");
        }
    }

    #[test]
    fn fixed_window_lengths() {
        let now = date(2024, 5, 20);
        let cases = [
            (TimeRange::Last14Days, 14),
            (TimeRange::Last30Days, 30),
            (TimeRange::Last60Days, 60),
            (TimeRange::Last90Days, 90),
        ];
        for (range, days) in cases {
            let resolved = resolve(range, now);
            let span = (resolved.end_date - resolved.start_date).num_days() + 1;
            assert_eq!(span, days, "{range:?}");
        }
    }

    #[test]
    fn last_month_covers_leap_february() {
        let resolved = resolve(TimeRange::LastMonth, date(2024, 3, 15));
        assert_eq!(resolved.start_date, date(2024, 2, 1));
        assert_eq!(resolved.end_date, date(2024, 2, 29));
    }

    #[test]
    fn last_month_in_january_wraps_to_previous_year() {
        let resolved = resolve(TimeRange::LastMonth, date(2024, 1, 10));
        assert_eq!(resolved.start_date, date(2023, 12, 1));
        assert_eq!(resolved.end_date, date(2023, 12, 31));
    }

    #[test]
    fn six_months_clamps_short_target_months() {
        // Yesterday is Aug 30; six months earlier is Feb 29 in a leap year.
        let resolved = resolve(TimeRange::Last6Months, date(2024, 8, 31));
        assert_eq!(resolved.start_date, date(2024, 2, 29));
        assert_eq!(resolved.end_date, date(2024, 8, 30));
    }

    #[test]
    fn this_month_on_the_first_stays_ordered() {
        let resolved = resolve(TimeRange::ThisMonth, date(2024, 8, 1));
        assert!(resolved.start_date <= resolved.end_date);
        assert_eq!(resolved.end_date, date(2024, 7, 31));
    }

    #[test]
    fn this_year_starts_january_first() {
        let resolved = resolve(TimeRange::ThisYear, date(2024, 3, 15));
        assert_eq!(resolved.start_date, date(2024, 1, 1));
        assert_eq!(resolved.end_date, date(2024, 3, 14));
    }

    #[test]
    fn unknown_selector_defaults_to_seven_days() {
        assert_eq!(TimeRange::parse("fortnight"), TimeRange::Last7Days);
        assert_eq!(TimeRange::parse(""), TimeRange::Last7Days);
        assert_eq!(TimeRange::parse("thisMonth"), TimeRange::ThisMonth);
    }

    #[test]
    fn serializes_as_camel_case_iso_dates() {
        let resolved = resolve(TimeRange::Last7Days, date(2024, 1, 15));
        let json = serde_json::to_value(resolved).unwrap();
        assert_eq!(json["startDate"], "2024-01-08");
        assert_eq!(json["endDate"], "2024-01-14");
    }
}
