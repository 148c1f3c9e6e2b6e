use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::camera::{CameraIndex, FeedSource, SourceKind};
use crate::config::WallConfig;
use crate::schedule::{TimerKey, Timers};
use crate::surface::WallSurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamState {
    pub source_kind: SourceKind,
    pub retry_scheduled: bool,
    pub attempt: u64,
    pub retries: u64,
}

pub struct StreamSupervisor {
    cam: CameraIndex,
    live_url: String,
    placeholder: String,
    retry: bool,
    retry_delay: Duration,
    state: StreamState,
}

impl StreamSupervisor {
    pub fn new(cam: CameraIndex, config: &WallConfig) -> Self {
        Self {
            cam,
            live_url: config.live_url(cam),
            placeholder: config.placeholder().to_string(),
            retry: config.retry_streams,
            retry_delay: config.retry_delay,
            state: StreamState {
                source_kind: SourceKind::Placeholder,
                retry_scheduled: false,
                attempt: 0,
                retries: 0,
            },
        }
    }

    pub fn cam(&self) -> CameraIndex {
        self.cam
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    pub fn start(&mut self, timers: &mut Timers, surface: &mut dyn WallSurface) {
        timers.cancel(TimerKey::StreamRetry(self.cam));
        self.state.attempt += 1;
        self.state.source_kind = SourceKind::Live;
        self.state.retry_scheduled = false;

        debug!(cam = %self.cam, attempt = self.state.attempt, url = %self.live_url, "starting feed");
        surface.set_source(
            self.cam,
            &FeedSource {
                kind: SourceKind::Live,
                url: self.live_url.clone(),
                attempt: self.state.attempt,
            },
        );
    }

    pub fn on_source_error(
        &mut self,
        now: Instant,
        timers: &mut Timers,
        surface: &mut dyn WallSurface,
    ) -> Option<Instant> {
        self.state.source_kind = SourceKind::Placeholder;
        surface.set_source(
            self.cam,
            &FeedSource {
                kind: SourceKind::Placeholder,
                url: self.placeholder.clone(),
                attempt: self.state.attempt,
            },
        );

        if !self.retry {
            warn!(cam = %self.cam, "feed failed, retry disabled");
            return None;
        }

        let at = now + self.retry_delay;
        timers.schedule(TimerKey::StreamRetry(self.cam), at);
        self.state.retry_scheduled = true;
        self.state.retries += 1;
        info!(
            cam = %self.cam,
            retry = self.state.retries,
            delay_ms = self.retry_delay.as_millis() as u64,
            "feed failed, retry scheduled"
        );
        Some(at)
    }

    /// Entry point for failures reported by the surface. Failures for an older
    /// attempt, or while the placeholder is up, are dropped.
    pub fn on_load_failure(
        &mut self,
        attempt: u64,
        now: Instant,
        timers: &mut Timers,
        surface: &mut dyn WallSurface,
    ) -> bool {
        if self.state.source_kind == SourceKind::Placeholder || attempt != self.state.attempt {
            debug!(
                cam = %self.cam,
                attempt,
                current = self.state.attempt,
                "ignoring stale feed failure"
            );
            return false;
        }
        self.on_source_error(now, timers, surface);
        true
    }

    pub(crate) fn retry_due(&mut self, timers: &mut Timers, surface: &mut dyn WallSurface) {
        self.state.retry_scheduled = false;
        self.start(timers, surface);
    }
}
