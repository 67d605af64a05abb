//! Monthly reference dates

use chrono::{Datelike, NaiveDate};
use vegwatch_core::{Error, Result};

/// Last calendar day of `month` (1-12) in `year`, leap years included.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// `(year, month)` that lies `offset` months before `(year, month)`.
///
/// Borrows across year boundaries: January minus one month is December
/// of the previous year. `None` if the result leaves the `i32` year range.
pub fn months_before(year: i32, month: u32, offset: usize) -> Option<(i32, u32)> {
    let offset = i64::try_from(offset).ok()?;
    let total = (i64::from(year) * 12 + i64::from(month) - 1).checked_sub(offset)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}

/// One reference date per completed month before `today`, most recent first.
///
/// Entry `i` (0-based) is the last day of the month `i + 1` months before
/// `today`'s month, so the result has exactly `months` distinct dates.
pub fn reference_dates(today: NaiveDate, months: usize) -> Result<Vec<NaiveDate>> {
    (1..=months)
        .map(|offset| {
            months_before(today.year(), today.month(), offset)
                .and_then(|(year, month)| last_day_of_month(year, month))
                .ok_or_else(|| Error::InvalidParameter {
                    name: "months",
                    value: months.to_string(),
                    reason: format!(
                        "{} months before {} is outside the supported calendar",
                        offset, today
                    ),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2025, 1), Some(date(2025, 1, 31)));
        assert_eq!(last_day_of_month(2025, 4), Some(date(2025, 4, 30)));
        assert_eq!(last_day_of_month(2025, 12), Some(date(2025, 12, 31)));
        assert_eq!(last_day_of_month(2023, 2), Some(date(2023, 2, 28)));
        assert_eq!(last_day_of_month(2024, 2), Some(date(2024, 2, 29)));
        assert_eq!(last_day_of_month(2000, 2), Some(date(2000, 2, 29)));
        assert_eq!(last_day_of_month(1900, 2), Some(date(1900, 2, 28)));
    }

    #[test]
    fn test_months_before_borrows_year() {
        assert_eq!(months_before(2025, 3, 1), Some((2025, 2)));
        assert_eq!(months_before(2025, 1, 1), Some((2024, 12)));
        assert_eq!(months_before(2025, 3, 3), Some((2024, 12)));
        assert_eq!(months_before(2025, 3, 15), Some((2023, 12)));
        assert_eq!(months_before(2025, 3, 0), Some((2025, 3)));
    }

    #[test]
    fn test_months_before_out_of_range() {
        assert_eq!(months_before(i32::MIN, 1, 1), None);
        assert_eq!(months_before(i32::MIN + 1, 1, usize::MAX), None);
    }

    #[test]
    fn test_reference_dates_beyond_calendar_is_error() {
        let earliest = NaiveDate::MIN;
        let result = reference_dates(earliest, 2);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "months", .. })
        ));
    }

    #[test]
    fn test_reference_dates_cross_year() {
        let dates = reference_dates(date(2025, 2, 14), 4).unwrap();
        assert_eq!(
            dates,
            vec![
                date(2025, 1, 31),
                date(2024, 12, 31),
                date(2024, 11, 30),
                date(2024, 10, 31),
            ]
        );
    }

    #[test]
    fn test_reference_dates_leap_february() {
        let dates = reference_dates(date(2024, 3, 1), 1).unwrap();
        assert_eq!(dates, vec![date(2024, 2, 29)]);
    }

    #[test]
    fn test_reference_dates_are_monthly_and_unique() {
        let dates = reference_dates(date(2026, 10, 18), 30).unwrap();
        assert_eq!(dates.len(), 30);

        // Walking oldest to newest, each date is in the next calendar month.
        for pair in dates.windows(2) {
            let (newer, older) = (pair[0], pair[1]);
            assert!(newer > older);
            let (y, m) = months_before(newer.year(), newer.month(), 1).unwrap();
            assert_eq!((older.year(), older.month()), (y, m));
        }

        let mut dedup = dates.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), dates.len());
    }

    #[test]
    fn test_zero_months_is_empty() {
        assert!(reference_dates(date(2025, 6, 1), 0).unwrap().is_empty());
    }
}
