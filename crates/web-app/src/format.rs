use chrono::{DateTime, NaiveDate, Utc};

/// Renders a number of minutes as hours and minutes, omitting zero components.
#[must_use]
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "0m".to_string();
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_datetime(datetime: DateTime<Utc>) -> String {
    format_date(datetime.date_naive())
}
