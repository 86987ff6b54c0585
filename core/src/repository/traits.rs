use crate::model::daily_log::DailyLog;
use anyhow::Result;
use chrono::NaiveDate;

pub trait DailyLogRepository {
    fn get(&self, date: NaiveDate) -> Result<Option<DailyLog>>;
    fn upsert(&self, log: &DailyLog) -> Result<()>;
    fn list(&self) -> Result<Vec<DailyLog>>;
}
