pub mod daily_log_service;
pub mod dto;
