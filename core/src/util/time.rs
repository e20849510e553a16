use chrono::{DateTime, Local, TimeZone};

/// Date and time layout of a record stamp, e.g. `2009/01/23 01:23:23 `.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S ";

pub fn log_timestamp() -> String {
    format_timestamp(&Local::now())
}

pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format(LOG_TIMESTAMP_FORMAT).to_string()
}
