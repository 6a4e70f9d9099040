//! Plain-text rendering of the calendar view.

use chrono::Weekday;

use crate::calendar::{weekday_headers, CalendarCell, CalendarMonth};

const CELL_WIDTH: usize = 4;

fn header_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Su",
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
    }
}

/// `>` marks today, `*` marks a day with deposits.
fn render_cell(cell: &CalendarCell) -> String {
    let Some(day) = cell.day else {
        return " ".repeat(CELL_WIDTH);
    };
    let lead = if cell.is_today { '>' } else { ' ' };
    let trail = if cell.has_deposits() { '*' } else { ' ' };
    format!("{}{:>2}{}", lead, day, trail)
}

/// Weekday header followed by one line per week.
pub fn render_grid(month: &CalendarMonth) -> Vec<String> {
    let header = weekday_headers(month.week_start)
        .into_iter()
        .map(|day| format!(" {} ", header_label(day)))
        .collect::<Vec<_>>()
        .join(" ");
    let mut lines = vec![header.trim_end().to_string()];
    lines.extend(month.weeks().map(|week| {
        week.iter()
            .map(render_cell)
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthKey;
    use crate::deposit::DepositRecord;
    use chrono::NaiveDate;

    fn at(day: u32) -> DepositRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        DepositRecord::new(format!("d{day}"), 10.0, ts)
    }

    #[test]
    fn january_2024_layout() {
        let month = CalendarMonth::build(
            &[at(1), at(17)],
            MonthKey::new(2024, 1).unwrap(),
            Weekday::Sun,
            NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        );
        let lines = render_grid(&month);
        assert_eq!(lines[0], " Su   Mo   Tu   We   Th   Fr   Sa");
        assert_eq!(lines[1], "       1*   2    3    4    5    6");
        assert_eq!(lines[3], " 14   15   16  >17*  18   19   20");
        assert_eq!(lines.len(), 1 + 5);
    }
}
