//! Thin layer of Gregorian calendar arithmetic over the [`time`] crate
use crate::error::ConfigError;
use std::cmp::Ordering;
use std::fmt;
use std::iter::successors;
use time::{Date, Duration, Month, Weekday};

pub const DAYS_IN_WEEK: usize = 7;

/// Earliest year whose month grids can be built without leaving the range of
/// [`Date`]
pub const MIN_YEAR: i32 = -9998;

/// Latest year whose month grids can be built without leaving the range of
/// [`Date`]
pub const MAX_YEAR: i32 = 9998;

pub trait WeekdayExt {
    /// Zero-based position of the weekday in a week that starts on `first`
    fn index_from(&self, first: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn index_from(&self, first: Weekday) -> u8 {
        (self.number_days_from_sunday() + 7 - first.number_days_from_sunday()) % 7
    }
}

/// Convert a day-of-week index (0 = Sunday through 6 = Saturday) to a
/// [`Weekday`]
pub fn weekday_from_index(index: u8) -> Result<Weekday, ConfigError> {
    match index {
        0 => Ok(Weekday::Sunday),
        1 => Ok(Weekday::Monday),
        2 => Ok(Weekday::Tuesday),
        3 => Ok(Weekday::Wednesday),
        4 => Ok(Weekday::Thursday),
        5 => Ok(Weekday::Friday),
        6 => Ok(Weekday::Saturday),
        _ => Err(ConfigError::InvalidWeekday(index)),
    }
}

/// Returns `date` moved by `days` days, or `None` if that leaves the range of
/// representable dates
pub fn add_days(date: Date, days: i64) -> Option<Date> {
    date.checked_add(Duration::days(days))
}

/// The most recent occurrence of `first` on or before `date`
pub fn start_of_week(date: Date, first: Weekday) -> Option<Date> {
    add_days(date, -i64::from(date.weekday().index_from(first)))
}

/// The next occurrence of the day before `first` on or after `date`
pub fn end_of_week(date: Date, first: Weekday) -> Option<Date> {
    add_days(date, 6 - i64::from(date.weekday().index_from(first)))
}

pub(crate) fn iter_days(from: Date) -> impl Iterator<Item = Date> {
    successors(Some(from), |&d| d.next_day())
}

/// A month of a specific year
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: Month) -> Result<YearMonth, ConfigError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) {
            Ok(YearMonth { year, month })
        } else {
            Err(ConfigError::YearOutOfRange(year))
        }
    }

    /// For constants whose year is known to be in range
    pub(crate) const fn new_unchecked(year: i32, month: Month) -> YearMonth {
        YearMonth { year, month }
    }

    /// The month containing `date`
    pub fn of(date: Date) -> Result<YearMonth, ConfigError> {
        YearMonth::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Number of days in the month
    pub fn day_count(&self) -> u8 {
        self.month.length(self.year)
    }

    pub fn first_day(&self) -> Date {
        self.date(1)
    }

    pub fn last_day(&self) -> Date {
        self.date(self.day_count())
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the month `n` months after this one (before, if `n` is
    /// negative), or `None` if that lies outside the supported years
    pub fn offset(&self, n: i32) -> Option<YearMonth> {
        let total = self.ordinal().checked_add(n)?;
        let year = total.div_euclid(12);
        let month = u8::try_from(total.rem_euclid(12) + 1).ok()?;
        YearMonth::new(year, Month::try_from(month).ok()?).ok()
    }

    pub fn next(&self) -> Option<YearMonth> {
        self.offset(1)
    }

    pub fn previous(&self) -> Option<YearMonth> {
        self.offset(-1)
    }

    /// Number of months from `self` to `other`; negative if `other` is
    /// earlier
    pub fn months_until(&self, other: YearMonth) -> i32 {
        other.ordinal() - self.ordinal()
    }

    fn ordinal(&self) -> i32 {
        self.year * 12 + i32::from(u8::from(self.month)) - 1
    }

    fn date(&self, day: u8) -> Date {
        // The year is range-checked on construction and `day` never exceeds
        // the month's length, so this cannot fail.
        let Ok(d) = Date::from_calendar_date(self.year, self.month, day) else {
            unreachable!("YearMonth should always hold a valid year");
        };
        d
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &YearMonth) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &YearMonth) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_index_from() {
        assert_eq!(Weekday::Sunday.index_from(Weekday::Sunday), 0);
        assert_eq!(Weekday::Saturday.index_from(Weekday::Sunday), 6);
        assert_eq!(Weekday::Sunday.index_from(Weekday::Monday), 6);
        assert_eq!(Weekday::Wednesday.index_from(Weekday::Monday), 2);
        assert_eq!(Weekday::Friday.index_from(Weekday::Saturday), 6);
    }

    #[test]
    fn test_weekday_from_index() {
        assert_eq!(weekday_from_index(0), Ok(Weekday::Sunday));
        assert_eq!(weekday_from_index(6), Ok(Weekday::Saturday));
        assert_eq!(weekday_from_index(7), Err(ConfigError::InvalidWeekday(7)));
    }

    #[test]
    fn test_week_bounds() {
        let d = date!(2022 - 06 - 01);
        assert_eq!(start_of_week(d, Weekday::Sunday), Some(date!(2022 - 05 - 29)));
        assert_eq!(end_of_week(d, Weekday::Sunday), Some(date!(2022 - 06 - 04)));
        assert_eq!(start_of_week(d, Weekday::Monday), Some(date!(2022 - 05 - 30)));
        assert_eq!(end_of_week(d, Weekday::Monday), Some(date!(2022 - 06 - 05)));
        assert_eq!(start_of_week(d, Weekday::Wednesday), Some(d));
    }

    #[test]
    fn test_first_last_day() {
        assert_eq!(ym(2024, February).day_count(), 29);
        assert_eq!(ym(2100, February).day_count(), 28);
        assert_eq!(ym(2000, February).day_count(), 29);
        assert_eq!(ym(2022, April).day_count(), 30);
        assert_eq!(ym(2023, February).last_day(), date!(2023 - 02 - 28));
        assert_eq!(ym(2022, June).first_day(), date!(2022 - 06 - 01));
        assert!(ym(2022, June).contains(date!(2022 - 06 - 30)));
        assert!(!ym(2022, June).contains(date!(2023 - 06 - 30)));
    }

    #[test]
    fn test_offset() {
        assert_eq!(ym(2022, November).offset(2), Some(ym(2023, January)));
        assert_eq!(ym(2022, January).offset(-1), Some(ym(2021, December)));
        assert_eq!(ym(2022, June).offset(-18), Some(ym(2020, December)));
        assert_eq!(ym(MAX_YEAR, December).next(), None);
        assert_eq!(ym(MIN_YEAR, January).previous(), None);
    }

    #[test]
    fn test_months_until_and_ordering() {
        assert_eq!(ym(2022, November).months_until(ym(2023, February)), 3);
        assert_eq!(ym(2023, February).months_until(ym(2022, November)), -3);
        assert!(ym(2022, December) < ym(2023, January));
        assert!(ym(2023, March) > ym(2023, February));
    }

    #[test]
    fn test_out_of_range_year() {
        assert_eq!(
            YearMonth::new(9999, January),
            Err(ConfigError::YearOutOfRange(9999))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ym(2022, June).to_string(), "2022-06");
    }
}
