use crate::camera::{CameraIndex, FeedSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallLayout {
    pub cell: Footprint,
    pub full: Footprint,
}

impl WallLayout {
    pub fn footprint(&self, fullscreen: bool) -> Footprint {
        if fullscreen {
            self.full
        } else {
            self.cell
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPosition {
    Fixed,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTransition {
    pub from: Footprint,
    pub to: Footprint,
    pub position: PlayerPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderColor {
    Highlight,
    Idle,
}

impl BorderColor {
    pub fn css_name(self) -> &'static str {
        match self {
            BorderColor::Highlight => "yellow",
            BorderColor::Idle => "darkgreen",
        }
    }
}

/// Live-source load failures do not go through this trait; implementations send
/// them to the runtime event channel with the failed source's attempt.
pub trait WallSurface {
    fn layout(&self) -> WallLayout;
    fn set_source(&mut self, cam: CameraIndex, source: &FeedSource);
    fn set_border(&mut self, cam: CameraIndex, color: BorderColor);
    fn transition_player(&mut self, transition: PlayerTransition);
    fn show(&mut self, cam: CameraIndex);
    fn hide(&mut self, cam: CameraIndex);
    fn set_title(&mut self, title: &str);
}
