pub mod daily_log;
pub mod traits;

// Re-export
pub use daily_log::FileDailyLogRepository;
pub use traits::DailyLogRepository;
