use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::currency::month_name;

/// Local calendar day a deposit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A calendar month. `month` is always in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    const FIRST: MonthKey = MonthKey {
        year: i32::MIN,
        month: 1,
    };
    const LAST: MonthKey = MonthKey {
        year: i32::MAX,
        month: 12,
    };

    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Builds a key from an arbitrary month number, rolling whole years
    /// forward or backward (`(2024, 13)` is January 2025).
    pub fn normalized(year: i32, month: i64) -> Self {
        Self::from_index((i64::from(year) * 12).saturating_add(month.saturating_sub(1)))
    }

    /// Parses `YYYY-MM`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    pub fn shift(&self, months: i64) -> Self {
        Self::from_index(self.index().saturating_add(months))
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of days in the month under Gregorian leap-year rules.
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        key.year == self.year && key.month == self.month
    }

    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Saturates at January of `i32::MIN` and December of `i32::MAX`.
    fn from_index(index: i64) -> Self {
        let index = index.clamp(Self::FIRST.index(), Self::LAST.index());
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Month after `(year, month)`, rolling December into January.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    let next = MonthKey::normalized(year, i64::from(month)).next();
    (next.year, next.month)
}

/// Month before `(year, month)`, rolling January into December.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    let prev = MonthKey::normalized(year, i64::from(month)).prev();
    (prev.year, prev.month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollover_at_year_boundaries() {
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 6), (2024, 7));
        assert_eq!(prev_month(2024, 6), (2024, 5));
    }

    #[test]
    fn navigation_saturates_at_representable_years() {
        assert_eq!(next_month(i32::MAX, 12), (i32::MAX, 12));
        assert_eq!(prev_month(i32::MIN, 1), (i32::MIN, 1));
        let last = MonthKey::new(i32::MAX, 11).unwrap();
        assert_eq!(last.shift(i64::MAX), MonthKey::new(i32::MAX, 12).unwrap());
        assert_eq!(last.shift(i64::MIN), MonthKey::new(i32::MIN, 1).unwrap());
    }

    #[test]
    fn out_of_range_months_are_normalized() {
        assert_eq!(next_month(2024, 13), (2025, 2));
        assert_eq!(prev_month(2024, 0), (2023, 11));
        assert_eq!(MonthKey::normalized(2024, -11), MonthKey::new(2023, 1).unwrap());
    }

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(MonthKey::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthKey::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthKey::new(2024, 4).unwrap().days_in_month(), 30);
    }

    #[test]
    fn parses_and_displays() {
        let key = MonthKey::parse("2024-03").unwrap();
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key.title(), "March 2024");
        assert!(MonthKey::parse("2024-00").is_none());
        assert!(MonthKey::parse("March").is_none());
        let day = DateKey::from_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(day.to_string(), "2024-03-05");
        assert!(key.contains(&day));
    }

    #[test]
    fn ordering_is_chronological() {
        let dec = MonthKey::new(2023, 12).unwrap();
        let jan = MonthKey::new(2024, 1).unwrap();
        assert!(dec < jan);
        assert_eq!(dec.next(), jan);
        assert_eq!(jan.shift(-13), MonthKey::new(2022, 12).unwrap());
    }
}
