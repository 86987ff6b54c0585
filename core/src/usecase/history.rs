use crate::repository::DailyLogRepository;
use crate::service::daily_log_service::DailyLogService;
use crate::service::dto::{DailyHistory, WeeklyHistory};
use chrono::{Datelike, NaiveDate};
use anyhow::Result;
use std::collections::BTreeMap;

pub struct HistoryUseCase<'a, L: DailyLogRepository> {
    daily_log_service: &'a DailyLogService<L>,
}

impl<'a, L: DailyLogRepository> HistoryUseCase<'a, L> {
    pub fn new(daily_log_service: &'a DailyLogService<L>) -> Self {
        Self { daily_log_service }
    }

    /// Logged days grouped by ISO week, newest week and newest day first.
    pub fn get_weekly_history(&self) -> Result<Vec<WeeklyHistory>> {
        let mut weekly_data: BTreeMap<(i32, u32), BTreeMap<NaiveDate, f64>> = BTreeMap::new();

        for log in self.daily_log_service.list_logs()? {
            let iso = log.date.iso_week();
            *weekly_data
                .entry((iso.year(), iso.week()))
                .or_default()
                .entry(log.date)
                .or_default() += log.hours;
        }

        let history = weekly_data
            .into_iter()
            .rev()
            .map(|((year, week), days_map)| {
                let days: Vec<DailyHistory> = days_map
                    .into_iter()
                    .rev()
                    .map(|(day, hours)| DailyHistory {
                        date: day.format("%Y-%m-%d").to_string(),
                        day_of_week: day.format("%a").to_string(),
                        hours,
                    })
                    .collect();
                let total_hours = days.iter().map(|d| d.hours).sum();

                WeeklyHistory { year, week, days, total_hours }
            })
            .collect();

        Ok(history)
    }

    pub fn total_hours(&self) -> Result<f64> {
        Ok(self.daily_log_service.list_logs()?.iter().map(|l| l.hours).sum())
    }
}
