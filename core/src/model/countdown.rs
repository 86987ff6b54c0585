use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Running { ends_at: Instant },
    Paused { remaining: Duration },
    Finished,
    Cancelled { elapsed: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Completed { elapsed: Duration },
    Cancelled { elapsed: Duration },
}

impl Outcome {
    /// Time credited to the daily log.
    pub fn elapsed(&self) -> Duration {
        match *self {
            Outcome::Completed { elapsed } | Outcome::Cancelled { elapsed } => elapsed,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }
}

/// Pausable countdown. Time is always passed in, never read from the
/// system clock, so the state machine can be driven by tests.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    phase: Phase,
}

impl Countdown {
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self {
            duration,
            phase: Phase::Running { ends_at: now + duration },
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Finished | Phase::Cancelled { .. })
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Running { ends_at } => ends_at.saturating_duration_since(now),
            Phase::Paused { remaining } => remaining,
            Phase::Finished => Duration::ZERO,
            Phase::Cancelled { elapsed } => self.duration.saturating_sub(elapsed),
        }
    }

    /// Fraction of the duration already counted, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let done = self.duration.saturating_sub(self.remaining(now));
        (done.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn tick(&mut self, now: Instant) -> Phase {
        if let Phase::Running { ends_at } = self.phase {
            if now >= ends_at {
                self.phase = Phase::Finished;
            }
        }
        self.phase
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.phase = match self.phase {
            Phase::Running { ends_at } => Phase::Paused {
                remaining: ends_at.saturating_duration_since(now),
            },
            Phase::Paused { remaining } => Phase::Running { ends_at: now + remaining },
            over => over,
        };
    }

    pub fn cancel(&mut self, now: Instant) {
        if self.is_over() {
            return;
        }
        let elapsed = self.duration.saturating_sub(self.remaining(now));
        self.phase = Phase::Cancelled { elapsed };
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished => Some(Outcome::Completed { elapsed: self.duration }),
            Phase::Cancelled { elapsed } => Some(Outcome::Cancelled { elapsed }),
            _ => None,
        }
    }
}
