pub mod countdown;
pub mod daily_log;
