use camwall_core::{
    EventSender, Footprint, MediaPlayer, PlayState, PlayerNotification, WallEvent,
};
use tracing::{debug, info};

pub const DEFAULT_TRACKS: [&str; 4] = [
    "Cab ride: mountain division",
    "Yard switching at dusk",
    "Helix climb, double header",
    "Night freight over the trestle",
];

pub struct PlaylistPlayer {
    tracks: Vec<String>,
    index: usize,
    state: PlayState,
    shuffle: bool,
    muted: bool,
    volume: u8,
    size: Option<Footprint>,
    seed: u64,
    events: EventSender,
}

impl PlaylistPlayer {
    pub fn new(tracks: Vec<String>, events: EventSender) -> Self {
        let tracks = if tracks.is_empty() {
            DEFAULT_TRACKS.iter().map(|t| t.to_string()).collect()
        } else {
            tracks
        };

        Self {
            tracks,
            index: 0,
            state: PlayState::Unstarted,
            shuffle: false,
            muted: false,
            volume: 100,
            size: None,
            seed: 0x9E37_79B9_7F4A_7C15,
            events,
        }
    }

    pub fn announce_ready(&self) {
        self.send(WallEvent::PlayerReady);
    }

    pub fn title(&self) -> &str {
        self.tracks
            .get(self.index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn size(&self) -> Option<Footprint> {
        self.size
    }

    fn notify(&self) {
        self.send(WallEvent::PlayerState(PlayerNotification {
            state: self.state,
            title: self.title().to_string(),
        }));
    }

    fn send(&self, event: WallEvent) {
        if self.events.send(event).is_err() {
            debug!("player notification dropped, runtime gone");
        }
    }

    fn set_state(&mut self, state: PlayState) {
        if self.state != state {
            self.state = state;
            self.notify();
        }
    }

    fn next_index(&mut self) -> usize {
        let len = self.tracks.len();
        if len < 2 {
            return 0;
        }
        if !self.shuffle {
            return (self.index + 1) % len;
        }

        // xorshift64
        self.seed ^= self.seed << 13;
        self.seed ^= self.seed >> 7;
        self.seed ^= self.seed << 17;
        let pick = (self.seed % len as u64) as usize;
        if pick == self.index {
            (pick + 1) % len
        } else {
            pick
        }
    }

    fn change_track(&mut self, index: usize) {
        self.index = index;
        info!(title = %self.title(), "track");
        if self.state == PlayState::Playing {
            self.notify();
        }
    }
}

impl MediaPlayer for PlaylistPlayer {
    fn play(&mut self) {
        self.set_state(PlayState::Playing);
    }

    fn pause(&mut self) {
        self.set_state(PlayState::Paused);
    }

    fn mute(&mut self) {
        self.muted = true;
    }

    fn unmute(&mut self) {
        self.muted = false;
    }

    fn set_volume(&mut self, pct: u8) {
        self.volume = pct.min(100);
    }

    fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
    }

    fn next_video(&mut self) {
        let next = self.next_index();
        self.change_track(next);
    }

    fn previous_video(&mut self) {
        let len = self.tracks.len().max(1);
        let previous = (self.index + len - 1) % len;
        self.change_track(previous);
    }

    fn set_size(&mut self, size: Footprint) {
        self.size = Some(size);
    }
}
