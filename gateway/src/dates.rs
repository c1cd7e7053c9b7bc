//! Calendar-date helpers for drive scheduling.
//!
//! The backend sends drive dates as `YYYY-MM-DD`, sometimes with a time part
//! appended. Only the day matters to the dashboard, so everything here works
//! on [`time::Date`]. Callers supply "today" so browser and CLI can each pick
//! their own clock.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::macros::format_description;
use time::{Date, Month};

/// Parse the day part of an ISO date or datetime string.
#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    let day = raw.trim().split('T').next()?;
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

/// Build a date from calendar parts, `None` when out of range.
#[must_use]
pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Date> {
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// `2025-05-01`
#[must_use]
pub fn iso(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// `May 1, 2025`
#[must_use]
pub fn format_long(date: Date) -> String {
    date.format(format_description!("[month repr:long] [day padding:none], [year]"))
        .unwrap_or_else(|_| iso(date))
}

/// `Thu, May 1, 2025`
#[must_use]
pub fn format_with_weekday(date: Date) -> String {
    date.format(format_description!(
        "[weekday repr:short], [month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| iso(date))
}

/// `5/1/2025`
#[must_use]
pub fn format_numeric(date: Date) -> String {
    format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
}

/// Whole days from `today` until `date` (negative when past).
#[must_use]
pub fn days_until(date: Date, today: Date) -> i64 {
    (date - today).whole_days()
}

/// Display form for a raw backend date, falling back to the raw text.
#[must_use]
pub fn display_long(raw: &str) -> String {
    parse_iso_date(raw).map_or_else(|| raw.to_owned(), format_long)
}
