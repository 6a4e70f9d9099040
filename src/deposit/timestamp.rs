use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves a wire timestamp into the viewer's local wall-clock time.
///
/// Instants carrying an offset are converted into `zone`; naive date-times
/// are already local; a bare date means local midnight. Returns `None` for
/// empty or unrecognised input.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(zone).naive_local());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(trimmed, format) {
            return Some(instant.with_timezone(zone).naive_local());
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(local);
        }
    }
    parse_calendar_date(trimmed).map(|date| date.and_time(NaiveTime::default()))
}

/// Resolves epoch milliseconds, as produced by `Date.now()`, into the
/// viewer's local wall-clock time.
pub fn parse_epoch_millis<Tz: TimeZone>(millis: i64, zone: &Tz) -> Option<NaiveDateTime> {
    zone.timestamp_millis_opt(millis)
        .single()
        .map(|instant| instant.naive_local())
}

/// Parses a `YYYY-MM-DD` calendar date as typed into a date input.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), CALENDAR_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn la_paz() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn utc_instant_is_shifted_into_viewer_zone() {
        let parsed = parse_timestamp("2024-03-16T03:30:00.000Z", &la_paz()).unwrap();
        assert_eq!(parsed, at(2024, 3, 15, 23, 30));
    }

    #[test]
    fn naive_datetime_is_taken_as_local() {
        let parsed = parse_timestamp("2024-03-15T23:30:00", &la_paz()).unwrap();
        assert_eq!(parsed, at(2024, 3, 15, 23, 30));
        let spaced = parse_timestamp("2024-03-15 08:05", &la_paz()).unwrap();
        assert_eq!(spaced, at(2024, 3, 15, 8, 5));
    }

    #[test]
    fn bare_date_is_local_midnight() {
        let parsed = parse_timestamp(" 2024-01-15 ", &la_paz()).unwrap();
        assert_eq!(parsed, at(2024, 1, 15, 0, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_timestamp("", &la_paz()).is_none());
        assert!(parse_timestamp("   ", &la_paz()).is_none());
        assert!(parse_timestamp("not a date", &la_paz()).is_none());
        assert!(parse_timestamp("2024-13-40", &la_paz()).is_none());
    }

    #[test]
    fn epoch_millis_are_shifted_into_viewer_zone() {
        // 2024-01-01T00:00:00Z
        let parsed = parse_epoch_millis(1_704_067_200_000, &la_paz()).unwrap();
        assert_eq!(parsed, at(2023, 12, 31, 20, 0));
        assert!(parse_epoch_millis(i64::MAX, &la_paz()).is_none());
    }

    #[test]
    fn calendar_dates_require_iso_shape() {
        assert_eq!(
            parse_calendar_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(parse_calendar_date("2023-02-29").is_none());
        assert!(parse_calendar_date("15/01/2024").is_none());
    }
}
