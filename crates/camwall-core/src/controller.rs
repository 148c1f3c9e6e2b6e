use std::time::Instant;

use tracing::{debug, info, warn};

use crate::aggregator::{Aggregate, MotionAggregator};
use crate::camera::CameraIndex;
use crate::command::Command;
use crate::config::WallConfig;
use crate::fullscreen::{Arbitration, FullscreenArbitrator, FullscreenState};
use crate::highlight::{HighlightState, HighlightTracker};
use crate::player::{MediaPlayer, PlayState, PlayerNotification};
use crate::poller::StatusPoller;
use crate::schedule::{TimerKey, Timers};
use crate::shuffle::{ShuffleControl, ShuffleState};
use crate::status::{PollError, StatusSnapshot};
use crate::stream::{StreamState, StreamSupervisor};
use crate::surface::WallSurface;

#[derive(Debug, Clone)]
pub enum WallEvent {
    PlayerReady,
    PlayerState(PlayerNotification),
    SourceFailed { cam: CameraIndex, attempt: u64 },
    Command(Command),
    PollCompleted(Result<StatusSnapshot, PollError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Idle,
    FetchStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub state: Option<PlayState>,
    pub title: Option<String>,
    pub muted: bool,
}

pub struct WallController<S: WallSurface, P: MediaPlayer> {
    config: WallConfig,
    surface: S,
    player: P,
    timers: Timers,
    streams: Vec<StreamSupervisor>,
    highlights: Vec<HighlightTracker>,
    poller: StatusPoller,
    aggregator: MotionAggregator,
    fullscreen: FullscreenArbitrator,
    shuffle: ShuffleControl,
    playback: PlaybackState,
}

impl<S: WallSurface, P: MediaPlayer> WallController<S, P> {
    pub fn new(config: WallConfig, surface: S, player: P) -> Self {
        let streams = config
            .cameras()
            .map(|cam| StreamSupervisor::new(cam, &config))
            .collect();
        let highlights = config
            .cameras()
            .map(|cam| HighlightTracker::new(cam, config.highlight_dwell))
            .collect();

        Self {
            poller: StatusPoller::new(&config),
            aggregator: MotionAggregator::new(config.cameras()),
            fullscreen: FullscreenArbitrator::new(config.lock_delay),
            shuffle: ShuffleControl::new(config.shuffle_delay),
            streams,
            highlights,
            surface,
            player,
            timers: Timers::new(),
            playback: PlaybackState::default(),
            config,
        }
    }

    pub fn initialize(&mut self) {
        info!(cameras = self.config.camera_count, "initializing wall");
        for stream in &mut self.streams {
            self.surface.show(stream.cam());
            stream.start(&mut self.timers, &mut self.surface);
        }
    }

    pub fn handle(&mut self, event: WallEvent, now: Instant) {
        match event {
            WallEvent::PlayerReady => self.on_player_ready(now),
            WallEvent::PlayerState(notification) => self.on_player_state(notification, now),
            WallEvent::SourceFailed { cam, attempt } => {
                self.on_load_failure(cam, attempt, now);
            }
            WallEvent::Command(command) => self.on_command(command, now),
            WallEvent::PollCompleted(result) => {
                self.on_poll_result(result, now);
            }
        }
    }

    pub fn advance(&mut self, now: Instant) -> Tick {
        let mut tick = Tick::Idle;
        for (key, deadline) in self.timers.take_due(now) {
            match key {
                TimerKey::StreamRetry(cam) => {
                    if let Some(stream) = self.streams.get_mut(cam.slot()) {
                        stream.retry_due(&mut self.timers, &mut self.surface);
                    }
                }
                TimerKey::HighlightExpiry(cam) => {
                    if let Some(tracker) = self.highlights.get_mut(cam.slot()) {
                        tracker.expire(deadline, &mut self.surface);
                    }
                }
                TimerKey::StatusPoll => {
                    if self.poller.begin() {
                        tick = Tick::FetchStatus;
                    }
                }
                TimerKey::ShuffleArm => self.shuffle.arm_due(&mut self.player),
            }
        }
        tick
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn on_player_ready(&mut self, now: Instant) {
        info!("player ready");
        self.player.mute();
        self.playback.muted = true;
        self.player.play();
        if self.poller.arm(now, &mut self.timers) {
            debug!(
                delay_ms = self.config.first_poll_delay.as_millis() as u64,
                "first status poll scheduled"
            );
        }
    }

    pub fn on_player_state(&mut self, notification: PlayerNotification, now: Instant) {
        info!(state = ?notification.state, title = %notification.title, "player state changed");
        self.surface
            .set_title(&format!("[Youtube] {}", notification.title));
        if self.shuffle.on_play_state(notification.state, now, &mut self.timers) {
            debug!("first playback seen, shuffle armed");
        }
        self.playback.state = Some(notification.state);
        self.playback.title = Some(notification.title);
    }

    pub fn on_source_error(&mut self, cam: CameraIndex, now: Instant) -> Option<Instant> {
        let Some(stream) = self.streams.get_mut(cam.slot()) else {
            warn!(%cam, "source error for unknown camera");
            return None;
        };
        stream.on_source_error(now, &mut self.timers, &mut self.surface)
    }

    pub fn on_load_failure(&mut self, cam: CameraIndex, attempt: u64, now: Instant) -> bool {
        let Some(stream) = self.streams.get_mut(cam.slot()) else {
            warn!(%cam, "load failure for unknown camera");
            return false;
        };
        stream.on_load_failure(attempt, now, &mut self.timers, &mut self.surface)
    }

    pub fn on_command(&mut self, command: Command, now: Instant) {
        debug!(?command, "command");
        match command {
            Command::ToggleShuffle => self.shuffle.toggle(&mut self.player),
            Command::ToggleFullscreen => {
                let outcome = self.fullscreen.toggle(now, &mut self.surface);
                self.after_arbitration(outcome);
            }
            Command::Highlight(cam) => {
                self.set_highlight(cam, true, true, now);
            }
            Command::NextTrack => self.player.next_video(),
            Command::PreviousTrack => self.player.previous_video(),
            Command::PlayPause => {
                if self.playback.state == Some(PlayState::Playing) {
                    self.player.pause();
                } else {
                    self.player.play();
                }
            }
            Command::ToggleMute => {
                if self.playback.muted {
                    self.player.unmute();
                    self.player.set_volume(self.config.volume_pct);
                } else {
                    self.player.mute();
                }
                self.playback.muted = !self.playback.muted;
                info!(muted = self.playback.muted, "audio");
            }
        }
    }

    pub fn on_poll_result(
        &mut self,
        result: Result<StatusSnapshot, PollError>,
        now: Instant,
    ) -> Option<Aggregate> {
        if !self.poller.is_polling() {
            debug!("dropping status result with no request in flight");
            return None;
        }

        match result {
            Ok(snapshot) => {
                let aggregate = self.apply_snapshot(&snapshot, now);
                self.poller.complete(Ok(&snapshot), now, &mut self.timers);
                Some(aggregate)
            }
            Err(err) => {
                self.poller.complete(Err(&err), now, &mut self.timers);
                None
            }
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: &StatusSnapshot, now: Instant) -> Aggregate {
        let aggregate = self.aggregator.aggregate(snapshot);
        for (cam, on) in &aggregate.highlights {
            self.set_highlight(*cam, *on, false, now);
        }

        if let Some(fullscreen) = self.aggregator.fullscreen_request(&aggregate) {
            let outcome = self.request_fullscreen(fullscreen, now);
            if outcome.settled() {
                self.aggregator.settle(aggregate.any_motion);
            } else {
                debug!(any_motion = aggregate.any_motion, "motion layout request deferred");
            }
        }
        aggregate
    }

    pub fn set_highlight(
        &mut self,
        cam: CameraIndex,
        active: bool,
        auto_off: bool,
        now: Instant,
    ) -> bool {
        let Some(tracker) = self.highlights.get_mut(cam.slot()) else {
            warn!(%cam, "highlight for unknown camera");
            return false;
        };
        tracker.set_highlight(active, auto_off, now, &mut self.timers, &mut self.surface)
    }

    pub fn request_fullscreen(&mut self, fullscreen: bool, now: Instant) -> Arbitration {
        let outcome = self.fullscreen.request(fullscreen, now, &mut self.surface);
        self.after_arbitration(outcome);
        outcome
    }

    fn after_arbitration(&mut self, outcome: Arbitration) {
        if !outcome.switched() {
            return;
        }
        let fullscreen = self.fullscreen.is_fullscreen();
        self.player
            .set_size(self.surface.layout().footprint(fullscreen));
        for cam in self.config.cameras() {
            if fullscreen {
                self.surface.hide(cam);
            } else {
                self.surface.show(cam);
            }
        }
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn stream(&self, cam: CameraIndex) -> Option<&StreamState> {
        self.streams.get(cam.slot()).map(StreamSupervisor::state)
    }

    pub fn highlight(&self, cam: CameraIndex) -> Option<HighlightState> {
        self.highlights.get(cam.slot()).map(HighlightTracker::state)
    }

    pub fn fullscreen(&self) -> FullscreenState {
        self.fullscreen.state()
    }

    pub fn shuffle(&self) -> ShuffleState {
        self.shuffle.state()
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    pub fn aggregator(&self) -> &MotionAggregator {
        &self.aggregator
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }
}
