use chrono::{Datelike, Local, NaiveDate};
use anyhow::{anyhow, Result};
use std::time::Duration;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day key used to name log files: `<day>-<month>-<year>` without padding.
pub fn day_key(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.day(), date.month(), date.year())
}

pub fn parse_day_key(input: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = input.split('-').collect();
    if parts.len() != 3 {
        return Err(anyhow!("Invalid day key: {}", input));
    }

    let day: u32 = parts[0].parse().map_err(|_| anyhow!("Invalid day in key: {}", input))?;
    let month: u32 = parts[1].parse().map_err(|_| anyhow!("Invalid month in key: {}", input))?;
    let year: i32 = parts[2].parse().map_err(|_| anyhow!("Invalid year in key: {}", input))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("No such date: {}", input))
}

/// Formats a remaining time as `MM:SS`, or `H:MM:SS` from one hour up.
/// Partial seconds round up so the display only reads `00:00` at expiry.
pub fn format_clock(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

pub fn hours(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() / 3600.0
}

pub fn minutes(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() / 60.0
}
