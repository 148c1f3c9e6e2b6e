use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::camera::{CameraIndex, FeedSource};
use crate::player::MediaPlayer;
use crate::status::{PollError, StatusSnapshot, StatusSource};
use crate::surface::{BorderColor, Footprint, PlayerTransition, WallLayout, WallSurface};

pub fn cam(index: u8) -> CameraIndex {
    CameraIndex::new(index).expect("valid camera index")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Source(CameraIndex, FeedSource),
    Border(CameraIndex, BorderColor),
    Transition(PlayerTransition),
    Show(CameraIndex),
    Hide(CameraIndex),
    Title(String),
}

/// Surface fake that records every call. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().expect("surface log").clone()
    }

    pub fn borders(&self) -> Vec<(CameraIndex, BorderColor)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Border(cam, color) => Some((cam, color)),
                _ => None,
            })
            .collect()
    }

    pub fn sources(&self, index: CameraIndex) -> Vec<FeedSource> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Source(cam, source) if cam == index => Some(source),
                _ => None,
            })
            .collect()
    }

    pub fn transitions(&self) -> Vec<PlayerTransition> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Transition(transition) => Some(transition),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().expect("surface log").push(call);
    }
}

pub const CELL: Footprint = Footprint {
    width: 640,
    height: 360,
};
pub const FULL: Footprint = Footprint {
    width: 1280,
    height: 720,
};

impl WallSurface for RecordingSurface {
    fn layout(&self) -> WallLayout {
        WallLayout {
            cell: CELL,
            full: FULL,
        }
    }

    fn set_source(&mut self, cam: CameraIndex, source: &FeedSource) {
        self.record(SurfaceCall::Source(cam, source.clone()));
    }

    fn set_border(&mut self, cam: CameraIndex, color: BorderColor) {
        self.record(SurfaceCall::Border(cam, color));
    }

    fn transition_player(&mut self, transition: PlayerTransition) {
        self.record(SurfaceCall::Transition(transition));
    }

    fn show(&mut self, cam: CameraIndex) {
        self.record(SurfaceCall::Show(cam));
    }

    fn hide(&mut self, cam: CameraIndex) {
        self.record(SurfaceCall::Hide(cam));
    }

    fn set_title(&mut self, title: &str) {
        self.record(SurfaceCall::Title(title.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCall {
    Play,
    Pause,
    Mute,
    Unmute,
    Volume(u8),
    Shuffle(bool),
    Next,
    Previous,
    Size(Footprint),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    calls: Arc<Mutex<Vec<PlayerCall>>>,
}

impl RecordingPlayer {
    pub fn calls(&self) -> Vec<PlayerCall> {
        self.calls.lock().expect("player log").clone()
    }

    fn record(&self, call: PlayerCall) {
        self.calls.lock().expect("player log").push(call);
    }
}

impl MediaPlayer for RecordingPlayer {
    fn play(&mut self) {
        self.record(PlayerCall::Play);
    }

    fn pause(&mut self) {
        self.record(PlayerCall::Pause);
    }

    fn mute(&mut self) {
        self.record(PlayerCall::Mute);
    }

    fn unmute(&mut self) {
        self.record(PlayerCall::Unmute);
    }

    fn set_volume(&mut self, pct: u8) {
        self.record(PlayerCall::Volume(pct));
    }

    fn set_shuffle(&mut self, enabled: bool) {
        self.record(PlayerCall::Shuffle(enabled));
    }

    fn next_video(&mut self) {
        self.record(PlayerCall::Next);
    }

    fn previous_video(&mut self) {
        self.record(PlayerCall::Previous);
    }

    fn set_size(&mut self, size: Footprint) {
        self.record(PlayerCall::Size(size));
    }
}

/// Status source that replays a fixed list of results, repeating the last.
pub struct ScriptedSource {
    script: Mutex<Vec<Result<StatusSnapshot, PollError>>>,
    fetches: Mutex<u32>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<StatusSnapshot, PollError>>) -> Self {
        Self {
            script: Mutex::new(script),
            fetches: Mutex::new(0),
        }
    }

    pub fn fetches(&self) -> u32 {
        *self.fetches.lock().expect("fetch count")
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch(&self) -> Result<StatusSnapshot, PollError> {
        *self.fetches.lock().expect("fetch count") += 1;
        let mut script = self.script.lock().expect("script");
        if script.len() > 1 {
            script.remove(0)
        } else {
            script
                .first()
                .cloned()
                .unwrap_or_else(|| Ok(StatusSnapshot::empty()))
        }
    }
}

pub fn snapshot(pairs: &[(&str, bool)]) -> StatusSnapshot {
    StatusSnapshot::new(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect(),
    )
}
