use chrono::NaiveDate;
use std::time::Duration;

use crate::time;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub hours: f64,
}

impl DailyLog {
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self { date, hours }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, 0.0)
    }

    pub fn add(&mut self, elapsed: Duration) {
        self.hours += time::hours(elapsed);
    }

    /// Single-line file body, e.g. `Total time: 1.5 hour(s).`
    pub fn render(&self) -> String {
        format!("Total time: {} hour(s).\n", self.hours)
    }

    /// Reads the first finite number in `content`. Accepts the plain `1.5`
    /// body as well as `1.5 hour(s).` and `Total time: 1.5 hour(s).`
    pub fn parse_hours(content: &str) -> Option<f64> {
        content
            .split_whitespace()
            .filter_map(|token| token.parse::<f64>().ok())
            .find(|hours| hours.is_finite())
    }
}
