use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CameraIndex(u8);

impl CameraIndex {
    pub const MAX: u8 = 9;

    pub fn new(index: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&index).then_some(Self(index))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn status_key(self) -> String {
        format!("cam{}", self.0)
    }

    pub(crate) fn slot(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for CameraIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Live,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub kind: SourceKind,
    pub url: String,
    /// Start attempt this source belongs to; load failures quote it back.
    pub attempt: u64,
}
