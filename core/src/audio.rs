//! Sound playback through whichever command-line audio player the system
//! provides. Opening the player fails fast: no player, or a missing asset,
//! is reported before any countdown starts.

use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};

pub const DEFAULT_SOUND_FILE: &str = "bell-ding.mp3";

/// A player program and the arguments that go before the sound file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

#[cfg(target_os = "macos")]
pub const PLAYER_CANDIDATES: &[PlayerCommand] = &[
    PlayerCommand { program: "afplay", args: &[] },
    PlayerCommand { program: "ffplay", args: &["-nodisp", "-autoexit", "-loglevel", "quiet"] },
];

#[cfg(not(target_os = "macos"))]
pub const PLAYER_CANDIDATES: &[PlayerCommand] = &[
    PlayerCommand { program: "ffplay", args: &["-nodisp", "-autoexit", "-loglevel", "quiet"] },
    PlayerCommand { program: "mpg123", args: &["-q"] },
    PlayerCommand { program: "mpv", args: &["--no-video", "--really-quiet"] },
    PlayerCommand { program: "paplay", args: &[] },
];

#[derive(Debug)]
pub struct SoundPlayer {
    program: PathBuf,
    args: &'static [&'static str],
    asset: PathBuf,
}

impl SoundPlayer {
    pub fn open(asset: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(asset, PLAYER_CANDIDATES)
    }

    pub fn open_with(asset: impl Into<PathBuf>, candidates: &[PlayerCommand]) -> Result<Self> {
        let (program, args) = candidates
            .iter()
            .find_map(|c| find_program(c.program).map(|path| (path, c.args)))
            .ok_or_else(|| {
                let names: Vec<&str> = candidates.iter().map(|c| c.program).collect();
                anyhow!("Can't initialize audio device: no audio player found (tried {})", names.join(", "))
            })?;
        info!(player = %program.display(), "audio player selected");

        let asset = asset.into();
        load_asset(&asset)?;

        Ok(Self { program, args, asset })
    }

    pub fn asset(&self) -> &Path {
        &self.asset
    }

    /// Plays the sound once and waits for the player to finish.
    pub fn play(&self) -> Result<()> {
        debug!(player = %self.program.display(), asset = %self.asset.display(), "playing sound");
        let status = Command::new(&self.program)
            .args(self.args)
            .arg(&self.asset)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("Can't play sound: failed to start {}", self.program.display()))?;

        if !status.success() {
            bail!("Can't play sound: {} exited with {}", self.program.display(), status);
        }
        Ok(())
    }
}

fn load_asset(asset: &Path) -> Result<()> {
    let file = File::open(asset)
        .with_context(|| format!("Can't load sound file: {}", asset.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("Can't load sound file: {}", asset.display()))?;
    if !metadata.is_file() {
        bail!("Can't load sound file: {} is not a file", asset.display());
    }
    Ok(())
}

fn find_program(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| {
            let plain = dir.join(name);
            let exe = dir.join(format!("{}{}", name, env::consts::EXE_SUFFIX));
            [plain, exe]
        })
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
