use std::time::{Duration, Instant};

use tracing::debug;

use crate::camera::CameraIndex;
use crate::schedule::{TimerKey, Timers};
use crate::surface::{BorderColor, WallSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightState {
    pub active: bool,
    pub expiry: Option<Instant>,
}

pub struct HighlightTracker {
    cam: CameraIndex,
    dwell: Duration,
    state: HighlightState,
}

impl HighlightTracker {
    pub fn new(cam: CameraIndex, dwell: Duration) -> Self {
        Self {
            cam,
            dwell,
            state: HighlightState::default(),
        }
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn set_highlight(
        &mut self,
        active: bool,
        auto_off: bool,
        now: Instant,
        timers: &mut Timers,
        surface: &mut dyn WallSurface,
    ) -> bool {
        if self.state.active == active {
            return false;
        }

        self.state.active = active;
        surface.set_border(self.cam, border_for(active));

        let key = TimerKey::HighlightExpiry(self.cam);
        if active && auto_off {
            let at = now + self.dwell;
            self.state.expiry = Some(at);
            timers.schedule(key, at);
        } else {
            self.state.expiry = None;
            timers.cancel(key);
        }
        true
    }

    /// Clears an auto-off highlight. The deadline must match the activation
    /// that scheduled it, otherwise the call is a no-op.
    pub(crate) fn expire(&mut self, deadline: Instant, surface: &mut dyn WallSurface) -> bool {
        if !self.state.active || self.state.expiry != Some(deadline) {
            debug!(cam = %self.cam, "stale highlight expiry ignored");
            return false;
        }
        self.state.active = false;
        self.state.expiry = None;
        surface.set_border(self.cam, BorderColor::Idle);
        true
    }
}

fn border_for(active: bool) -> BorderColor {
    if active {
        BorderColor::Highlight
    } else {
        BorderColor::Idle
    }
}
