use std::time::Duration;

use thiserror::Error;

use crate::camera::CameraIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Mjpeg,
    H264,
}

impl FeedFormat {
    pub fn path_segment(self) -> &'static str {
        match self {
            FeedFormat::Mjpeg => "mjpeg",
            FeedFormat::H264 => "h264",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FeedFormat::Mjpeg => "no_camera.jpg",
            FeedFormat::H264 => "no_camera.mp4",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("camera count must be between 1 and {max}, got {got}")]
    CameraCount { got: u8, max: u8 },
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("volume must be at most 100, got {0}")]
    Volume(u8),
}

#[derive(Debug, Clone)]
pub struct WallConfig {
    pub base_url: String,
    pub camera_count: u8,
    pub feed_format: FeedFormat,
    pub retry_streams: bool,
    pub retry_delay: Duration,
    pub highlight_dwell: Duration,
    pub retry_polls: bool,
    pub first_poll_delay: Duration,
    pub poll_interval: Duration,
    pub poll_backoff: Duration,
    pub status_timeout: Duration,
    pub lock_delay: Duration,
    pub shuffle_delay: Duration,
    pub volume_pct: u8,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            camera_count: 3,
            feed_format: FeedFormat::Mjpeg,
            retry_streams: true,
            retry_delay: Duration::from_millis(500),
            highlight_dwell: Duration::from_millis(5000),
            retry_polls: true,
            first_poll_delay: Duration::from_millis(2000),
            poll_interval: Duration::from_millis(500),
            poll_backoff: Duration::from_millis(2000),
            status_timeout: Duration::from_secs(5),
            lock_delay: Duration::from_millis(5000),
            shuffle_delay: Duration::from_millis(1000),
            volume_pct: 50,
        }
    }
}

impl WallConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.camera_count == 0 || self.camera_count > CameraIndex::MAX {
            return Err(ConfigError::CameraCount {
                got: self.camera_count,
                max: CameraIndex::MAX,
            });
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let durations = [
            ("retry delay", self.retry_delay),
            ("highlight dwell", self.highlight_dwell),
            ("poll interval", self.poll_interval),
            ("poll backoff", self.poll_backoff),
            ("status timeout", self.status_timeout),
        ];
        for (name, value) in durations {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }

        if self.volume_pct > 100 {
            return Err(ConfigError::Volume(self.volume_pct));
        }
        Ok(())
    }

    pub fn cameras(&self) -> impl Iterator<Item = CameraIndex> {
        (1..=self.camera_count).filter_map(CameraIndex::new)
    }

    pub fn live_url(&self, cam: CameraIndex) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.feed_format.path_segment(),
            cam
        )
    }

    pub fn status_url(&self) -> String {
        format!("{}/status", self.base_url.trim_end_matches('/'))
    }

    pub fn placeholder(&self) -> &'static str {
        self.feed_format.placeholder()
    }
}
