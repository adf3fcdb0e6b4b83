use chrono::{DateTime, Local, NaiveDate};
use std::time::{Duration, UNIX_EPOCH};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

/// Short label for a unix timestamp relative to today.
pub fn format_timestamp(timestamp: u64) -> String {
    format_relative(timestamp, Local::now().date_naive())
}

fn format_relative(timestamp: u64, today: NaiveDate) -> String {
    let time = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: DateTime<Local> = time.into();
    let date = datetime.date_naive();

    if date == today {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if Some(date) == today.pred_opt() {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}
