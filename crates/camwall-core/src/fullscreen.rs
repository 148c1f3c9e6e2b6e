use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::surface::{PlayerPosition, PlayerTransition, WallSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    Switched,
    Unchanged,
    Locked { remaining: Duration },
}

impl Arbitration {
    pub fn switched(self) -> bool {
        matches!(self, Arbitration::Switched)
    }

    pub fn settled(self) -> bool {
        !matches!(self, Arbitration::Locked { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullscreenState {
    pub is_fullscreen: bool,
    pub last_toggle_at: Option<Instant>,
}

pub struct FullscreenArbitrator {
    lock_delay: Duration,
    state: FullscreenState,
}

impl FullscreenArbitrator {
    pub fn new(lock_delay: Duration) -> Self {
        Self {
            lock_delay,
            state: FullscreenState::default(),
        }
    }

    pub fn state(&self) -> FullscreenState {
        self.state
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.is_fullscreen
    }

    pub fn request(
        &mut self,
        fullscreen: bool,
        now: Instant,
        surface: &mut dyn WallSurface,
    ) -> Arbitration {
        if self.state.is_fullscreen == fullscreen {
            return Arbitration::Unchanged;
        }

        if let Some(last) = self.state.last_toggle_at {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.lock_delay {
                let remaining = self.lock_delay - elapsed;
                debug!(
                    fullscreen,
                    remaining_ms = remaining.as_millis() as u64,
                    "fullscreen toggle locked"
                );
                return Arbitration::Locked { remaining };
            }
        }

        self.state.last_toggle_at = Some(now);
        self.state.is_fullscreen = fullscreen;

        let layout = surface.layout();
        let transition = PlayerTransition {
            from: layout.footprint(!fullscreen),
            to: layout.footprint(fullscreen),
            position: if fullscreen {
                PlayerPosition::Fixed
            } else {
                PlayerPosition::Normal
            },
        };
        info!(
            fullscreen,
            width = transition.to.width,
            height = transition.to.height,
            "player layout switched"
        );
        surface.transition_player(transition);
        Arbitration::Switched
    }

    pub fn toggle(&mut self, now: Instant, surface: &mut dyn WallSurface) -> Arbitration {
        self.request(!self.state.is_fullscreen, now, surface)
    }
}
