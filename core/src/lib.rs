pub mod audio;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;

pub use audio::{SoundPlayer, DEFAULT_SOUND_FILE};
pub use model::countdown::{Countdown, Outcome, Phase};
pub use model::daily_log::DailyLog;
pub use repository::{DailyLogRepository, FileDailyLogRepository};
pub use input::{normalize_args, resolve_minutes, Control, ControlSource, MinutesArg, DEFAULT_MINUTES};
pub use time::{day_key, format_clock, today};
pub use service::daily_log_service::DailyLogService;
pub use usecase::session::{CountdownView, SessionUseCase, SystemClock, TickFrame};
