use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::keys::{DateKey, MonthKey};
use crate::deposit::DepositRecord;

/// Deposits recorded on a single local day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: DateKey,
    pub count: usize,
    pub total: f64,
}

impl DayBucket {
    fn empty(date: DateKey) -> Self {
        Self {
            date,
            count: 0,
            total: 0.0,
        }
    }
}

/// Count, total and average of the deposits in one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub count: usize,
    pub total: f64,
    pub average: f64,
}

impl MonthSummary {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            count: 0,
            total: 0.0,
            average: 0.0,
        }
    }

    /// Reduces the buckets belonging to `month`; other buckets are ignored.
    pub fn from_buckets<'a>(
        month: MonthKey,
        buckets: impl IntoIterator<Item = &'a DayBucket>,
    ) -> Self {
        let (count, total) = buckets
            .into_iter()
            .filter(|bucket| month.contains(&bucket.date))
            .fold((0usize, 0.0f64), |(count, total), bucket| {
                (count + bucket.count, total + bucket.total)
            });
        let average = if count > 0 { total / count as f64 } else { 0.0 };
        Self {
            month,
            count,
            total,
            average,
        }
    }
}

/// Groups records by local calendar day.
///
/// Records without a usable timestamp are skipped; they never abort the
/// pass.
pub fn bucket_by_day(records: &[DepositRecord]) -> BTreeMap<DateKey, DayBucket> {
    let mut buckets: BTreeMap<DateKey, DayBucket> = BTreeMap::new();
    let mut skipped = 0usize;
    for record in records {
        let Some(key) = record.date_key() else {
            skipped += 1;
            continue;
        };
        let bucket = buckets.entry(key).or_insert_with(|| DayBucket::empty(key));
        bucket.count += 1;
        bucket.total += record.amount;
    }
    if skipped > 0 {
        tracing::debug!(skipped, "records without timestamp left out of day buckets");
    }
    buckets
}

/// Summary of the deposits whose local date falls in `(year, month)`.
///
/// An out-of-range `month` is normalized by month arithmetic, matching
/// [`super::next_month`].
pub fn month_summary(records: &[DepositRecord], year: i32, month: u32) -> MonthSummary {
    let key = MonthKey::normalized(year, i64::from(month));
    summarize_month(&bucket_by_day(records), key)
}

/// Same as [`month_summary`] over buckets that were already computed.
pub fn summarize_month(buckets: &BTreeMap<DateKey, DayBucket>, month: MonthKey) -> MonthSummary {
    let start = DateKey {
        year: month.year(),
        month: month.month(),
        day: 1,
    };
    let end = DateKey {
        year: month.year(),
        month: month.month(),
        day: 31,
    };
    MonthSummary::from_buckets(month, buckets.range(start..=end).map(|(_, bucket)| bucket))
}
