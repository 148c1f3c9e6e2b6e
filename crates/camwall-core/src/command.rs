use crate::camera::CameraIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleShuffle,
    ToggleFullscreen,
    Highlight(CameraIndex),
    NextTrack,
    PreviousTrack,
    PlayPause,
    ToggleMute,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            's' => Some(Command::ToggleShuffle),
            'f' | 'u' => Some(Command::ToggleFullscreen),
            'n' => Some(Command::NextTrack),
            'p' => Some(Command::PreviousTrack),
            'k' => Some(Command::PlayPause),
            'm' => Some(Command::ToggleMute),
            '1'..='9' => key
                .to_digit(10)
                .and_then(|d| CameraIndex::new(d as u8))
                .map(Command::Highlight),
            _ => None,
        }
    }
}
