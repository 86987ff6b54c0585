mod history;
mod tui;

use std::path::PathBuf;
use std::time::Duration;
use anyhow::Result;
use clap::Parser;
use tinypomo_core::repository::daily_log::DEFAULT_LOG_DIR;
use tinypomo_core::time::{hours, minutes};
use tinypomo_core::{
    normalize_args, resolve_minutes, today, DailyLogService, FileDailyLogRepository, Outcome,
    SoundPlayer, DEFAULT_SOUND_FILE,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::tui::app::KeyBindings;

#[derive(Parser, Debug)]
#[command(name = "tinypomo", version)]
#[command(about = "A tiny pomodoro timer that rings a bell and logs your hours", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Countdown length in minutes (default: 25)
    #[arg(short = 'm', value_name = "MINUTES", num_args = 0..=1, allow_hyphen_values = true)]
    minutes: Option<String>,

    /// Do not add this session to the daily log (also accepted as -nolog)
    #[arg(long = "nolog")]
    nolog: bool,

    /// Anything else on the command line is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show logged hours per day, grouped by week
    History,
}

struct Settings {
    minutes: u64,
    log_enabled: bool,
    log_dir: PathBuf,
    sound_file: PathBuf,
    bindings: KeyBindings,
}

impl Settings {
    fn from_cli(cli: &Cli) -> Self {
        let arg = resolve_minutes(cli.minutes.as_deref());
        if let Some(warning) = &arg.warning {
            eprintln!("{}", warning);
        }
        if !cli.ignored.is_empty() {
            debug!(ignored = ?cli.ignored, "ignoring extra arguments");
        }

        Self {
            minutes: arg.minutes,
            log_enabled: !cli.nolog,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            sound_file: PathBuf::from(DEFAULT_SOUND_FILE),
            bindings: KeyBindings::default(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args()));

    match cli.command {
        Some(Commands::History) => {
            let service = DailyLogService::new(FileDailyLogRepository::new(DEFAULT_LOG_DIR));
            history::show_history(&service)?;
        }
        None => {
            let settings = Settings::from_cli(&cli);
            // Fail before counting down if the bell can't ring.
            let player = SoundPlayer::open(&settings.sound_file)?;
            run_timer(settings, &player, tui::run)?;
        }
    }
    Ok(())
}

/// Counts down, logs the session, then rings the bell on natural expiry.
fn run_timer<F>(settings: Settings, player: &SoundPlayer, countdown: F) -> Result<Outcome>
where
    F: FnOnce(Duration, KeyBindings) -> Result<Outcome>,
{
    println!("Timer started for {} minute(s)...", settings.minutes);
    let duration = Duration::from_secs(settings.minutes.saturating_mul(60));
    let outcome = countdown(duration, settings.bindings)?;

    match outcome {
        Outcome::Completed { .. } => println!("Time is up!"),
        Outcome::Cancelled { elapsed } => {
            println!("Timer stopped after {:.1} minute(s).", minutes(elapsed))
        }
    }

    if settings.log_enabled {
        let service = DailyLogService::new(FileDailyLogRepository::new(&settings.log_dir));
        match service.record(today(), outcome.elapsed()) {
            Ok(log) => println!(
                "Logged {:.2} hour(s). Total time today: {:.2} hour(s).",
                hours(outcome.elapsed()),
                log.hours
            ),
            Err(e) => {
                error!("daily log update failed: {:#}", e);
                eprintln!("Could not update the daily log: {:#}", e);
            }
        }
    }

    if outcome.is_completed() {
        player.play()?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use tinypomo_core::audio::PlayerCommand;

    // `sh -c <script> <asset>`: lists the log directory next to the asset
    // into `rang`, so the listing shows what was logged before the bell.
    const RECORDING_PLAYER: PlayerCommand = PlayerCommand {
        program: "sh",
        args: &["-c", r#"d=$(dirname "$0"); ls "$d/log" > "$d/rang" 2>&1; exit 0"#],
    };

    struct Fixture {
        dir: TempDir,
        player: SoundPlayer,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let asset = dir.path().join(DEFAULT_SOUND_FILE);
            fs::write(&asset, b"ID3").unwrap();
            let player = SoundPlayer::open_with(&asset, &[RECORDING_PLAYER]).unwrap();
            Self { dir, player }
        }

        fn settings(&self, minutes: u64, log_enabled: bool) -> Settings {
            Settings {
                minutes,
                log_enabled,
                log_dir: self.log_dir(),
                sound_file: self.dir.path().join(DEFAULT_SOUND_FILE),
                bindings: KeyBindings::default(),
            }
        }

        fn log_dir(&self) -> PathBuf {
            self.dir.path().join("log")
        }

        fn log_file(&self) -> PathBuf {
            FileDailyLogRepository::new(self.log_dir()).path_for(today())
        }

        fn rang(&self) -> Option<String> {
            fs::read_to_string(self.dir.path().join("rang")).ok()
        }
    }

    fn finished_after(expected: Duration, outcome: Outcome) -> impl FnOnce(Duration, KeyBindings) -> Result<Outcome> {
        move |duration, _| {
            assert_eq!(duration, expected);
            Ok(outcome)
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(normalize_args(args.iter().copied()))
    }

    #[test]
    fn test_minutes_flag() {
        let cli = parse(&["tinypomo", "-m", "10"]);
        assert_eq!(cli.minutes.as_deref(), Some("10"));
        assert!(!cli.nolog);
        assert_eq!(Settings::from_cli(&cli).minutes, 10);
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["tinypomo"]);
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.minutes, 25);
        assert!(settings.log_enabled);
        assert_eq!(settings.log_dir, PathBuf::from("log"));
        assert_eq!(settings.sound_file, PathBuf::from("bell-ding.mp3"));
    }

    #[test]
    fn test_nolog_in_either_order() {
        for args in [
            &["tinypomo", "-nolog"][..],
            &["tinypomo", "-m", "5", "-nolog"][..],
            &["tinypomo", "-nolog", "-m", "5"][..],
            &["tinypomo", "--nolog", "-m", "5"][..],
        ] {
            let settings = Settings::from_cli(&parse(args));
            assert!(!settings.log_enabled, "args {:?}", args);
        }
        assert_eq!(Settings::from_cli(&parse(&["tinypomo", "-nolog", "-m", "5"])).minutes, 5);
    }

    #[test]
    fn test_bad_minutes_fall_back() {
        assert_eq!(Settings::from_cli(&parse(&["tinypomo", "-m", "abc"])).minutes, 25);
        assert_eq!(Settings::from_cli(&parse(&["tinypomo", "-m", "-3"])).minutes, 25);
        assert_eq!(Settings::from_cli(&parse(&["tinypomo", "-m"])).minutes, 25);
        assert_eq!(Settings::from_cli(&parse(&["tinypomo", "-m", "300000000000000000"])).minutes, 25);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unknown_arguments_are_ignored() {
        let cli = parse(&["tinypomo", "-m", "15", "--loud", "extra"]);
        assert_eq!(cli.ignored, vec!["--loud", "extra"]);
        assert_eq!(Settings::from_cli(&cli).minutes, 15);
    }

    #[test]
    fn test_history_subcommand() {
        let cli = parse(&["tinypomo", "history"]);
        assert!(matches!(cli.command, Some(Commands::History)));
    }

    #[test]
    fn test_run_timer_nolog_writes_nothing() {
        let fx = Fixture::new();
        let outcome = Outcome::Completed { elapsed: Duration::from_secs(60) };

        let result = run_timer(fx.settings(1, false), &fx.player, finished_after(Duration::from_secs(60), outcome));

        assert_eq!(result.unwrap(), outcome);
        assert!(!fx.log_dir().exists());
        assert!(fx.rang().is_some());
    }

    #[test]
    fn test_run_timer_logs_before_the_bell() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.log_dir()).unwrap();
        fs::write(fx.log_file(), "Total time: 1.5 hour(s).\n").unwrap();
        let outcome = Outcome::Completed { elapsed: Duration::from_secs(30 * 60) };

        run_timer(fx.settings(30, true), &fx.player, finished_after(Duration::from_secs(30 * 60), outcome)).unwrap();

        assert_eq!(fs::read_to_string(fx.log_file()).unwrap(), "Total time: 2 hour(s).\n");
        let listing = fx.rang().expect("bell should ring on completion");
        assert!(listing.contains(&file_name(&fx.log_file())), "listing {:?}", listing);
    }

    #[test]
    fn test_run_timer_cancelled_logs_partial_time_without_bell() {
        let fx = Fixture::new();
        let outcome = Outcome::Cancelled { elapsed: Duration::from_secs(15 * 60) };

        run_timer(fx.settings(60, true), &fx.player, finished_after(Duration::from_secs(60 * 60), outcome)).unwrap();

        assert_eq!(fs::read_to_string(fx.log_file()).unwrap(), "Total time: 0.25 hour(s).\n");
        assert!(fx.rang().is_none());
    }

    #[test]
    fn test_run_timer_log_failure_still_rings_and_succeeds() {
        let fx = Fixture::new();
        // A regular file where the log directory should be.
        fs::write(fx.log_dir(), b"not a directory").unwrap();
        let outcome = Outcome::Completed { elapsed: Duration::from_secs(60) };

        let result = run_timer(fx.settings(1, true), &fx.player, finished_after(Duration::from_secs(60), outcome));

        assert!(result.is_ok());
        assert!(fx.log_dir().is_file());
        assert!(fx.rang().is_some());
    }

    #[test]
    fn test_run_timer_countdown_error_skips_log_and_bell() {
        let fx = Fixture::new();

        let result = run_timer(fx.settings(1, true), &fx.player, |_, _| anyhow::bail!("terminal gone"));

        assert!(result.is_err());
        assert!(!fx.log_dir().exists());
        assert!(fx.rang().is_none());
    }
}
