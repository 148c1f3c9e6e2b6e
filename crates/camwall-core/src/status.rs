use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub received_at: DateTime<Utc>,
    pub motion: BTreeMap<String, bool>,
}

impl StatusSnapshot {
    pub fn new(motion: BTreeMap<String, bool>) -> Self {
        Self {
            received_at: Utc::now(),
            motion,
        }
    }

    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Builds a snapshot from a status body. Only a literal `true` counts as
    /// motion; any other value is kept as `false`.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, PollError> {
        let Some(object) = value.as_object() else {
            return Err(PollError::Malformed(format!(
                "expected a JSON object, got {}",
                json_kind(value)
            )));
        };

        let motion = object
            .iter()
            .map(|(key, v)| (key.clone(), v.as_bool() == Some(true)))
            .collect();
        Ok(Self::new(motion))
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, PollError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|err| PollError::Malformed(err.to_string()))?;
        Self::from_value(&value)
    }

    pub fn has_motion(&self, cam: CameraIndex) -> bool {
        self.motion
            .get(&cam.status_key())
            .copied()
            .unwrap_or(false)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed status body: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<StatusSnapshot, PollError>;
}
