use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Reporting granularity for the primary dashboard view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

/// Computes the inclusive `[start, end]` window for a period around the
/// reference instant. Days run 00:00:00.000 to 23:59:59.999; weeks start on
/// the ISO Monday of the reference date; months span the 1st through the last
/// calendar day.
pub fn period_window(period: Period, reference: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let date = reference.date();
    match period {
        Period::Day => (day_start(date), day_end(date)),
        Period::Week => {
            let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
            (day_start(monday), day_end(monday + Duration::days(6)))
        }
        Period::Month => {
            let first = date.with_day(1).unwrap();
            (day_start(first), day_end(last_day_of_month(first)))
        }
    }
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap()
}

fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999).unwrap()
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    first_of_next - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn day_window_covers_exactly_one_calendar_day() {
        let (start, end) = period_window(Period::Day, at(2024, 3, 15, 10));
        assert_eq!(start, at(2024, 3, 15, 0));
        assert_eq!(end.date(), start.date());
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert!(start <= end);
    }

    #[test]
    fn week_window_starts_on_monday() {
        // 2024-03-15 is a Friday; its ISO week is Mar 11 to Mar 17.
        let (start, end) = period_window(Period::Week, at(2024, 3, 15, 10));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
    }

    #[test]
    fn sunday_reference_maps_to_week_started_six_days_earlier() {
        // 2024-03-17 is a Sunday.
        let (start, end) = period_window(Period::Week, at(2024, 3, 17, 10));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
    }

    #[test]
    fn month_window_handles_varying_lengths() {
        let (start, end) = period_window(Period::Month, at(2024, 2, 10, 10));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (start, end) = period_window(Period::Month, at(2023, 2, 10, 10));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn december_month_window_rolls_into_next_year_for_its_end() {
        let (start, end) = period_window(Period::Month, at(2024, 12, 25, 10));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }
}
