use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub const ASSIGNMENTS_PATH: &str = "/assignments";

/// Calendar dates are read as midnight UTC of that day.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
