use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::model::daily_log::DailyLog;
use crate::repository::traits::DailyLogRepository;
use crate::time::{day_key, parse_day_key};

pub const DEFAULT_LOG_DIR: &str = "log";
const LOG_FILE_EXTENSION: &str = "txt";

/// One text file per day under `dir`, named after the day key.
#[derive(Clone)]
pub struct FileDailyLogRepository {
    dir: PathBuf,
}

impl FileDailyLogRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.{}", day_key(date), LOG_FILE_EXTENSION))
    }

    // Missing, unreadable and unparseable files all read as zero hours.
    fn read_hours(path: &Path) -> Option<f64> {
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read log file, treating as empty");
                return Some(0.0);
            }
        };
        match DailyLog::parse_hours(&content) {
            Some(hours) => Some(hours),
            None => {
                warn!(path = %path.display(), "log file has no total, treating as empty");
                Some(0.0)
            }
        }
    }
}

impl DailyLogRepository for FileDailyLogRepository {
    fn get(&self, date: NaiveDate) -> Result<Option<DailyLog>> {
        let path = self.path_for(date);
        Ok(Self::read_hours(&path).map(|hours| DailyLog::new(date, hours)))
    }

    fn upsert(&self, log: &DailyLog) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Could not create log directory {}", self.dir.display()))?;
        let path = self.path_for(log.date);
        fs::write(&path, log.render())
            .with_context(|| format!("Could not write log file {}", path.display()))?;
        debug!(path = %path.display(), hours = log.hours, "log file written");
        Ok(())
    }

    fn list(&self) -> Result<Vec<DailyLog>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut logs = Vec::new();
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Could not read log directory {}", self.dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(LOG_FILE_EXTENSION) {
                continue;
            }
            let Some(date) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| parse_day_key(s).ok())
            else {
                continue;
            };
            let hours = Self::read_hours(&path).unwrap_or(0.0);
            logs.push(DailyLog::new(date, hours));
        }

        logs.sort_by_key(|l| l.date);
        Ok(logs)
    }
}
