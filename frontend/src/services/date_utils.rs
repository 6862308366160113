use chrono::{Datelike, NaiveDate};

use super::aggregates::month_label;

/// Today's local date, from the browser clock.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Leading `YYYY-MM-DD` of a backend date or datetime string.
pub fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// `"2025-06-03T10:00:00"` → `"Jun 3, 2025"`; unparseable input is returned as is.
pub fn format_short_date(value: &str) -> String {
    match parse_date_prefix(value) {
        Some(date) => format!("{} {}, {}", &month_label(date.month())[..3], date.day(), date.year()),
        None => value.to_string(),
    }
}

/// `2025-06-03` → `"June 3, 2025"`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_label(date.month()), date.day(), date.year())
}

pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// Relative deadline text for goal cards.
pub fn deadline_label(deadline: NaiveDate, today: NaiveDate) -> String {
    match days_until(deadline, today) {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        n if n > 1 => format!("{} days left", n),
        -1 => "Overdue by 1 day".to_string(),
        n => format!("Overdue by {} days", -n),
    }
}
