pub mod aggregator;
pub mod camera;
pub mod command;
pub mod config;
pub mod controller;
pub mod fullscreen;
pub mod highlight;
pub mod http;
pub mod player;
pub mod poller;
pub mod runtime;
pub mod schedule;
pub mod shuffle;
pub mod status;
pub mod stream;
pub mod surface;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod http_tests;

pub use aggregator::{Aggregate, MotionAggregator};
pub use camera::{CameraIndex, FeedSource, SourceKind};
pub use command::Command;
pub use config::{ConfigError, FeedFormat, WallConfig};
pub use controller::{PlaybackState, Tick, WallController, WallEvent};
pub use fullscreen::{Arbitration, FullscreenArbitrator, FullscreenState};
pub use highlight::{HighlightState, HighlightTracker};
pub use http::HttpStatusSource;
pub use player::{MediaPlayer, PlayState, PlayerNotification};
pub use poller::{PollPhase, PollStats, StatusPoller};
pub use runtime::{event_channel, spawn_fetch, EventReceiver, EventSender, WallRuntime};
pub use schedule::{TimerKey, Timers};
pub use shuffle::{ShuffleControl, ShuffleState};
pub use status::{PollError, StatusSnapshot, StatusSource};
pub use stream::{StreamState, StreamSupervisor};
pub use surface::{
    BorderColor, Footprint, PlayerPosition, PlayerTransition, WallLayout, WallSurface,
};
