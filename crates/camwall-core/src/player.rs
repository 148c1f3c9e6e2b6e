use serde::{Deserialize, Serialize};

use crate::surface::Footprint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(PlayState::Unstarted),
            0 => Some(PlayState::Ended),
            1 => Some(PlayState::Playing),
            2 => Some(PlayState::Paused),
            3 => Some(PlayState::Buffering),
            5 => Some(PlayState::Cued),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            PlayState::Unstarted => -1,
            PlayState::Ended => 0,
            PlayState::Playing => 1,
            PlayState::Paused => 2,
            PlayState::Buffering => 3,
            PlayState::Cued => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNotification {
    pub state: PlayState,
    pub title: String,
}

pub trait MediaPlayer {
    fn play(&mut self);
    fn pause(&mut self);
    fn mute(&mut self);
    fn unmute(&mut self);
    fn set_volume(&mut self, pct: u8);
    fn set_shuffle(&mut self, enabled: bool);
    fn next_video(&mut self);
    fn previous_video(&mut self);
    fn set_size(&mut self, size: Footprint);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_codes_map_both_ways() {
        for code in [-1, 0, 1, 2, 3, 5] {
            let state = PlayState::from_code(code).expect("known code");
            assert_eq!(state.code(), code);
        }
        assert_eq!(PlayState::from_code(1), Some(PlayState::Playing));
        assert_eq!(PlayState::from_code(4), None);
    }
}
