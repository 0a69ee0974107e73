use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

use crate::error::ConversionError;
use crate::ports::Result;

/// Converts a `YYYY-MM-DD` date to the Unix timestamp of its local midnight.
pub fn parse_date_to_local_timestamp(value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
        ConversionError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })?;

    // On a DST fold the earlier instant wins
    date.and_hms_opt(0, 0, 0)
        .and_then(|midnight| {
            first_valid_instant(midnight, |local| {
                Local
                    .from_local_datetime(local)
                    .earliest()
                    .map(|dt| dt.timestamp())
            })
        })
        .ok_or_else(|| ConversionError::NonexistentLocalTime {
            date: value.to_string(),
        })
}

/// Timestamp of `start`, or of the first minute after it that exists locally
/// when `start` falls into a clock gap. Gives up after a day.
fn first_valid_instant<F>(start: NaiveDateTime, lookup: F) -> Option<i64>
where
    F: Fn(&NaiveDateTime) -> Option<i64>,
{
    (0..=24 * 60)
        .map(|minutes| start + TimeDelta::minutes(minutes))
        .find_map(|local| lookup(&local))
}

/// Renders a Unix timestamp key as local `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp_to_local(key: &str) -> Result<String> {
    let invalid = || ConversionError::InvalidTimestamp {
        key: key.to_string(),
    };
    let seconds = key.trim().parse::<i64>().map_err(|_| invalid())?;
    let dt = Local.timestamp_opt(seconds, 0).single().ok_or_else(invalid)?;
    Ok(dt.format("%Y-%m-%d %H:%M:%S").to_string())
}
