use crate::model::daily_log::DailyLog;
use crate::repository::DailyLogRepository;
use anyhow::Result;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::info;

pub struct DailyLogService<R: DailyLogRepository> {
    repo: R,
}

impl<R: DailyLogRepository> DailyLogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_log(&self, date: NaiveDate) -> Result<Option<DailyLog>> {
        self.repo.get(date)
    }

    pub fn list_logs(&self) -> Result<Vec<DailyLog>> {
        self.repo.list()
    }

    /// Adds `elapsed` to the day's running total and returns the new record.
    pub fn record(&self, date: NaiveDate, elapsed: Duration) -> Result<DailyLog> {
        let mut log = self.repo.get(date)?.unwrap_or_else(|| DailyLog::empty(date));
        let previous = log.hours;
        log.add(elapsed);
        self.repo.upsert(&log)?;
        info!(%date, previous, total = log.hours, "time logged");
        Ok(log)
    }
}
