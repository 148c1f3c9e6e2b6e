use camwall_core::{
    BorderColor, CameraIndex, FeedSource, Footprint, PlayerPosition, PlayerTransition,
    WallLayout, WallSurface,
};
use tracing::info;

use crate::feed_probe::FeedProber;

pub struct LogSurface {
    layout: WallLayout,
    prober: FeedProber,
}

impl LogSurface {
    pub fn new(display: Footprint, prober: FeedProber) -> Self {
        let layout = WallLayout {
            cell: Footprint::new(display.width / 2, display.height / 2),
            full: display,
        };
        Self { layout, prober }
    }
}

impl WallSurface for LogSurface {
    fn layout(&self) -> WallLayout {
        self.layout
    }

    fn set_source(&mut self, cam: CameraIndex, source: &FeedSource) {
        info!(%cam, kind = ?source.kind, url = %source.url, attempt = source.attempt, "source");
        self.prober.probe(cam, source);
    }

    fn set_border(&mut self, cam: CameraIndex, color: BorderColor) {
        info!(%cam, color = color.css_name(), "border");
    }

    fn transition_player(&mut self, transition: PlayerTransition) {
        let position = match transition.position {
            PlayerPosition::Fixed => "fixed",
            PlayerPosition::Normal => "normal",
        };
        info!(
            from = %format!("{}x{}", transition.from.width, transition.from.height),
            to = %format!("{}x{}", transition.to.width, transition.to.height),
            position,
            "player transition"
        );
    }

    fn show(&mut self, cam: CameraIndex) {
        info!(%cam, "show");
    }

    fn hide(&mut self, cam: CameraIndex) {
        info!(%cam, "hide");
    }

    fn set_title(&mut self, title: &str) {
        info!(%title, "title");
    }
}
