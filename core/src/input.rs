use std::time::{Duration, Instant};
use anyhow::Result;

pub const DEFAULT_MINUTES: u64 = 25;

#[derive(Debug, PartialEq)]
pub struct MinutesArg {
    pub minutes: u64,
    pub warning: Option<String>,
}

/// Rewrites the single-dash `-nolog` spelling into `--nolog` so the argument
/// parser sees a regular long flag. Everything else is passed through.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == "-nolog" { "--nolog".to_string() } else { arg })
        .collect()
}

pub fn resolve_minutes(raw: Option<&str>) -> MinutesArg {
    let Some(raw) = raw else {
        return MinutesArg { minutes: DEFAULT_MINUTES, warning: None };
    };

    match raw.trim().parse::<u64>() {
        Ok(minutes) if minutes > 0 && fits_on_clock(minutes) => MinutesArg { minutes, warning: None },
        _ => MinutesArg {
            minutes: DEFAULT_MINUTES,
            warning: Some(format!(
                "Invalid input for minutes '{}', using default of {}.",
                raw, DEFAULT_MINUTES
            )),
        },
    }
}

// The countdown deadline is `Instant::now() + duration`; it must not overflow.
fn fits_on_clock(minutes: u64) -> bool {
    minutes
        .checked_mul(60)
        .and_then(|secs| Instant::now().checked_add(Duration::from_secs(secs)))
        .is_some()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    TogglePause,
    Cancel,
}

/// Source of pause/cancel signals for a running countdown.
///
/// `poll` blocks for at most `timeout` and returns the first control that
/// arrived, or `None` when the timeout passed quietly.
pub trait ControlSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Control>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_minutes_valid() {
        assert_eq!(resolve_minutes(Some("1")).minutes, 1);
        assert_eq!(resolve_minutes(Some("50")).minutes, 50);
        assert_eq!(resolve_minutes(Some(" 7 ")).minutes, 7);
        assert!(resolve_minutes(Some("90")).warning.is_none());
    }

    #[test]
    fn test_resolve_minutes_default() {
        let arg = resolve_minutes(None);
        assert_eq!(arg.minutes, DEFAULT_MINUTES);
        assert!(arg.warning.is_none());
    }

    #[test]
    fn test_resolve_minutes_invalid_falls_back() {
        for raw in ["abc", "", "0", "-5", "12abc", "1.5", "99999999999999999999999",
                    "300000000000000000", "18446744073709551615"] {
            let arg = resolve_minutes(Some(raw));
            assert_eq!(arg.minutes, DEFAULT_MINUTES, "input {:?}", raw);
            assert!(arg.warning.is_some(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_args() {
        let args = normalize_args(["tinypomo", "-nolog", "-m", "10"]);
        assert_eq!(args, vec!["tinypomo", "--nolog", "-m", "10"]);

        let args = normalize_args(["tinypomo", "-m", "10", "-nolog"]);
        assert_eq!(args, vec!["tinypomo", "-m", "10", "--nolog"]);

        // Only the exact flag is rewritten.
        let args = normalize_args(["tinypomo", "-m", "-nologs"]);
        assert_eq!(args, vec!["tinypomo", "-m", "-nologs"]);
    }
}
