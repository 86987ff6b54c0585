use crate::input::{Control, ControlSource};
use crate::model::countdown::{Countdown, Outcome};
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const TICK: Duration = Duration::from_secs(1);

pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Snapshot handed to the view on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFrame {
    pub remaining: Duration,
    pub total: Duration,
    pub progress: f64,
    pub paused: bool,
}

pub trait CountdownView {
    fn render(&mut self, frame: &TickFrame) -> Result<()>;
}

pub struct SessionUseCase<C: Clock> {
    clock: C,
    tick: Duration,
}

impl<C: Clock> SessionUseCase<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, tick: TICK }
    }

    /// Counts `duration` down, redrawing once per tick and applying pause
    /// and cancel controls as they arrive.
    pub fn run(
        &self,
        duration: Duration,
        controls: &mut dyn ControlSource,
        view: &mut dyn CountdownView,
    ) -> Result<Outcome> {
        let mut countdown = Countdown::start(duration, self.clock.now());
        info!(minutes = duration.as_secs() / 60, "countdown started");

        loop {
            let now = self.clock.now();
            countdown.tick(now);
            view.render(&frame_of(&countdown, now))?;

            if let Some(outcome) = countdown.outcome() {
                info!(?outcome, "countdown over");
                return Ok(outcome);
            }

            // Never oversleep the deadline while running.
            let wait = if countdown.is_paused() {
                self.tick
            } else {
                self.tick.min(countdown.remaining(now))
            };

            match controls.poll(wait)? {
                Some(Control::TogglePause) => {
                    countdown.toggle_pause(self.clock.now());
                    debug!(paused = countdown.is_paused(), "pause toggled");
                }
                Some(Control::Cancel) => {
                    countdown.cancel(self.clock.now());
                    debug!("countdown cancelled");
                }
                None => {}
            }
        }
    }
}

fn frame_of(countdown: &Countdown, now: Instant) -> TickFrame {
    TickFrame {
        remaining: countdown.remaining(now),
        total: countdown.duration(),
        progress: countdown.progress(now),
        paused: countdown.is_paused(),
    }
}
