use crate::calendar::{bucket_by_day, summarize_month, MonthKey, MonthSummary};
use crate::deposit::DepositRecord;

/// Months shown by the admin trend chart.
pub const DEFAULT_TREND_MONTHS: usize = 6;
/// Longest series `trailing_months` builds; larger requests are clamped.
pub const MAX_TREND_MONTHS: usize = 120;

/// Chronological month summaries for the `months` months ending at
/// `anchor` (inclusive), at most [`MAX_TREND_MONTHS`]. Months without
/// deposits are zero-filled.
pub fn trailing_months(
    records: &[DepositRecord],
    anchor: MonthKey,
    months: usize,
) -> Vec<MonthSummary> {
    let buckets = bucket_by_day(records);
    let months = months.min(MAX_TREND_MONTHS) as i64;
    (0..months)
        .rev()
        .map(|back| summarize_month(&buckets, anchor.shift(-back)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn on(y: i32, m: u32, d: u32, amount: f64) -> DepositRecord {
        let ts = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        DepositRecord::new(format!("{y}{m}{d}"), amount, ts)
    }

    #[test]
    fn series_crosses_year_boundary_and_zero_fills() {
        let records = vec![on(2023, 11, 3, 10.0), on(2024, 2, 10, 20.0), on(2024, 2, 11, 5.0)];
        let anchor = MonthKey::new(2024, 2).unwrap();
        let series = trailing_months(&records, anchor, DEFAULT_TREND_MONTHS);
        let months: Vec<String> = series.iter().map(|s| s.month.to_string()).collect();
        assert_eq!(
            months,
            ["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
        );
        assert_eq!(series[2].total, 10.0);
        assert_eq!(series[3].count, 0);
        assert_eq!(series[5].count, 2);
        assert_eq!(series[5].average, 12.5);
    }

    #[test]
    fn oversized_requests_are_clamped() {
        let anchor = MonthKey::new(2024, 1).unwrap();
        let series = trailing_months(&[], anchor, usize::MAX / 8);
        assert_eq!(series.len(), MAX_TREND_MONTHS);
        assert_eq!(series.last().map(|s| s.month), Some(anchor));
        assert_eq!(series[0].month, MonthKey::new(2014, 2).unwrap());
    }

    #[test]
    fn zero_months_is_empty() {
        assert!(trailing_months(&[], MonthKey::new(2024, 1).unwrap(), 0).is_empty());
    }
}
