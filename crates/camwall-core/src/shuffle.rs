use std::time::{Duration, Instant};

use tracing::info;

use crate::player::{MediaPlayer, PlayState};
use crate::schedule::{TimerKey, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleState {
    pub enabled: bool,
    pub armed: bool,
}

pub struct ShuffleControl {
    delay: Duration,
    state: ShuffleState,
}

impl ShuffleControl {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: ShuffleState {
                enabled: false,
                armed: true,
            },
        }
    }

    pub fn state(&self) -> ShuffleState {
        self.state
    }

    pub fn on_play_state(&mut self, state: PlayState, now: Instant, timers: &mut Timers) -> bool {
        if !self.state.armed || state != PlayState::Playing {
            return false;
        }
        self.state.armed = false;
        timers.schedule(TimerKey::ShuffleArm, now + self.delay);
        true
    }

    pub(crate) fn arm_due(&mut self, player: &mut dyn MediaPlayer) {
        self.set(true, player);
    }

    pub fn toggle(&mut self, player: &mut dyn MediaPlayer) {
        self.set(!self.state.enabled, player);
    }

    fn set(&mut self, enabled: bool, player: &mut dyn MediaPlayer) {
        info!(enabled, "shuffle");
        self.state.enabled = enabled;
        player.set_shuffle(enabled);
    }
}
