mod common;

use chrono::{Datelike, FixedOffset, NaiveDate, Weekday};
use common::{at, deposit, sample_records};
use savings_core::calendar::{days_in_grid_starting, is_leap_year, CalendarMonth};
use savings_core::{
    bucket_by_day, days_in_grid, month_summary, next_month, prev_month, CalendarCursor, DateKey,
    DepositStore, MonthKey,
};

fn key(year: i32, month: u32, day: u32) -> DateKey {
    DateKey { year, month, day }
}

#[test]
fn january_2024_grid() {
    let grid = days_in_grid(2024, 1);
    assert_eq!(grid.len(), 32);
    assert_eq!(grid[0], None);
    assert_eq!(grid[1], Some(1));
    assert_eq!(grid.last(), Some(&Some(31)));
}

#[test]
fn february_grids_follow_leap_rules() {
    let days = |year| days_in_grid(year, 2).into_iter().flatten().count();
    assert_eq!(days(2024), 29);
    assert_eq!(days(2023), 28);
    assert_eq!(days(2000), 29);
    assert_eq!(days(1900), 28);
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
}

#[test]
fn every_grid_lists_each_day_once_after_blanks() {
    for year in [2023, 2024, 2025] {
        for month in 1..=12 {
            let grid = days_in_grid(year, month);
            let blanks = grid.iter().take_while(|cell| cell.is_none()).count();
            assert!(blanks < 7);
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            assert_eq!(blanks as u32, first.weekday().num_days_from_sunday());
            let days: Vec<u32> = grid[blanks..].iter().map(|cell| cell.unwrap()).collect();
            assert_eq!(days, (1..=days.len() as u32).collect::<Vec<_>>());
        }
    }
}

#[test]
fn monday_first_grid_shifts_blanks() {
    // 1 January 2024 is a Monday.
    assert_eq!(days_in_grid_starting(2024, 1, Weekday::Mon)[0], Some(1));
    assert_eq!(days_in_grid_starting(2024, 1, Weekday::Sat).iter().flatten().count(), 31);
}

#[test]
fn month_navigation_rolls_over_years() {
    assert_eq!(next_month(2024, 12), (2025, 1));
    assert_eq!(prev_month(2024, 1), (2023, 12));
    assert_eq!(next_month(2024, 5), (2024, 6));
    assert_eq!(prev_month(2024, 5), (2024, 4));

    let mut cursor = CalendarCursor::new(MonthKey::new(2024, 12).unwrap());
    cursor.next();
    cursor.prev();
    assert_eq!(cursor.current(), MonthKey::new(2024, 12).unwrap());
}

#[test]
fn buckets_conserve_count_and_total() {
    let records = sample_records();
    let buckets = bucket_by_day(&records);
    let dated: Vec<_> = records.iter().filter(|r| r.timestamp.is_some()).collect();

    let count: usize = buckets.values().map(|bucket| bucket.count).sum();
    let total: f64 = buckets.values().map(|bucket| bucket.total).sum();
    assert_eq!(count, dated.len());
    assert_eq!(total, dated.iter().map(|r| r.amount).sum::<f64>());
}

#[test]
fn same_day_deposits_share_a_bucket() {
    let records = vec![
        deposit("a", 10.0, at(2024, 3, 15, 0, 0)),
        deposit("b", 15.5, at(2024, 3, 15, 23, 59)),
        deposit("c", 1.0, at(2024, 3, 16, 0, 0)),
    ];
    let buckets = bucket_by_day(&records);
    let day = buckets.get(&key(2024, 3, 15)).unwrap();
    assert_eq!((day.count, day.total), (2, 25.5));
    assert_eq!(buckets.get(&key(2024, 3, 16)).map(|b| b.count), Some(1));
}

#[test]
fn late_evening_offset_stays_on_local_day() {
    // 23:30 in La Paz is already the next day in UTC.
    let json = r#"[
        {"_id": "late", "amount": 50, "date": "2024-03-15T23:30:00-04:00"},
        {"_id": "utc", "amount": 25, "date": "2024-03-16T03:30:00Z"}
    ]"#;
    let la_paz = FixedOffset::west_opt(4 * 3600).unwrap();
    let store = DepositStore::from_json_str(json, &la_paz).unwrap();
    let buckets = bucket_by_day(store.records());

    let day = buckets.get(&key(2024, 3, 15)).unwrap();
    assert_eq!(day.count, 2);
    assert_eq!(day.total, 75.0);
    assert!(!buckets.contains_key(&key(2024, 3, 16)));
}

#[test]
fn month_summary_matches_buckets_of_that_month() {
    let records = sample_records();
    let january = month_summary(&records, 2024, 1);
    assert_eq!(january.count, 2);
    assert_eq!(january.total, 120.0);
    assert_eq!(january.average, 60.0);

    let buckets = bucket_by_day(&records);
    for (year, month) in [(2024, 1), (2024, 2), (2024, 3), (2024, 4)] {
        let summary = month_summary(&records, year, month);
        let in_month: Vec<_> = buckets
            .values()
            .filter(|bucket| bucket.date.year == year && bucket.date.month == month)
            .collect();
        assert_eq!(summary.count, in_month.iter().map(|b| b.count).sum::<usize>());
        assert_eq!(summary.total, in_month.iter().map(|b| b.total).sum::<f64>());
    }
}

#[test]
fn month_summary_does_not_confuse_years() {
    let records = vec![
        deposit("2023", 5.0, at(2023, 1, 5, 10, 0)),
        deposit("2024", 7.0, at(2024, 1, 5, 10, 0)),
    ];
    assert_eq!(month_summary(&records, 2024, 1).total, 7.0);
    assert_eq!(month_summary(&records, 2023, 1).total, 5.0);
}

#[test]
fn empty_input_is_safe() {
    assert!(bucket_by_day(&[]).is_empty());
    let summary = month_summary(&[], 2024, 1);
    assert_eq!((summary.count, summary.total, summary.average), (0, 0.0, 0.0));

    let view = CalendarMonth::build(
        &[],
        MonthKey::new(2024, 2).unwrap(),
        Weekday::Sun,
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
    );
    assert_eq!(view.days_with_deposits(), 0);
    assert_eq!(view.cells.iter().filter(|cell| cell.is_today).count(), 1);
}

#[test]
fn calendar_view_marks_deposit_days() {
    let records = sample_records();
    let view = CalendarMonth::build(
        &records,
        MonthKey::new(2024, 1).unwrap(),
        Weekday::Sun,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    );
    let marked: Vec<u32> = view
        .cells
        .iter()
        .filter(|cell| cell.has_deposits())
        .filter_map(|cell| cell.day)
        .collect();
    assert_eq!(marked, vec![10, 31]);
    assert!(view.cells.iter().all(|cell| !cell.is_today));
    assert_eq!(view.summary.total, 120.0);
}
