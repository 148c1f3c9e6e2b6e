use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::WallConfig;
use crate::schedule::{TimerKey, Timers};
use crate::status::{PollError, StatusSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Scheduled,
    Polling,
    /// Retry disabled and a poll failed; never armed again.
    Stopped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls_ok: u64,
    pub polls_err: u64,
    pub errors_in_row: u32,
    pub last_ok_ts: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

pub struct StatusPoller {
    phase: PollPhase,
    first_delay: Duration,
    interval: Duration,
    backoff: Duration,
    retry: bool,
    stats: PollStats,
}

impl StatusPoller {
    pub fn new(config: &WallConfig) -> Self {
        Self {
            phase: PollPhase::Idle,
            first_delay: config.first_poll_delay,
            interval: config.poll_interval,
            backoff: config.poll_backoff,
            retry: config.retry_polls,
            stats: PollStats::default(),
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    pub fn arm(&mut self, now: Instant, timers: &mut Timers) -> bool {
        if self.phase != PollPhase::Idle {
            return false;
        }
        self.schedule(now + self.first_delay, timers);
        true
    }

    pub fn begin(&mut self) -> bool {
        if self.phase != PollPhase::Scheduled {
            debug!(phase = ?self.phase, "poll timer fired outside the scheduled phase");
            return false;
        }
        self.phase = PollPhase::Polling;
        true
    }

    pub fn is_polling(&self) -> bool {
        self.phase == PollPhase::Polling
    }

    pub fn complete(
        &mut self,
        outcome: Result<&StatusSnapshot, &PollError>,
        now: Instant,
        timers: &mut Timers,
    ) -> Option<Duration> {
        match outcome {
            Ok(snapshot) => {
                self.stats.polls_ok += 1;
                self.stats.errors_in_row = 0;
                self.stats.last_ok_ts = Some(snapshot.received_at);
                self.schedule(now + self.interval, timers);
                Some(self.interval)
            }
            Err(err) => {
                self.stats.polls_err += 1;
                self.stats.errors_in_row += 1;
                self.stats.last_error = Some(err.to_string());

                if !self.retry {
                    warn!(error = %err, "status poll failed, polling stopped");
                    self.phase = PollPhase::Stopped;
                    return None;
                }

                warn!(
                    error = %err,
                    errors_in_row = self.stats.errors_in_row,
                    backoff_ms = self.backoff.as_millis() as u64,
                    "status poll failed"
                );
                self.schedule(now + self.backoff, timers);
                Some(self.backoff)
            }
        }
    }

    fn schedule(&mut self, at: Instant, timers: &mut Timers) {
        timers.schedule(TimerKey::StatusPoll, at);
        self.phase = PollPhase::Scheduled;
    }
}
