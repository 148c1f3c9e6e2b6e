use std::time::Duration;

use anyhow::Result;
use camwall_core::{CameraIndex, EventSender, FeedSource, SourceKind, WallEvent};
use reqwest::Client;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct FeedProber {
    http: Client,
    events: EventSender,
}

impl FeedProber {
    pub fn new(events: EventSender, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, events })
    }

    pub fn probe(&self, cam: CameraIndex, source: &FeedSource) {
        if source.kind != SourceKind::Live {
            return;
        }

        let http = self.http.clone();
        let events = self.events.clone();
        let url = source.url.clone();
        let attempt = source.attempt;

        tokio::spawn(async move {
            let failure = match http.get(&url).send().await {
                Ok(response) if response.status().is_success() => None,
                Ok(response) => Some(format!("status {}", response.status())),
                Err(err) => Some(err.to_string()),
            };

            match failure {
                None => debug!(%cam, attempt, %url, "feed reachable"),
                Some(reason) => {
                    warn!(%cam, attempt, %url, %reason, "feed failed to load");
                    if events.send(WallEvent::SourceFailed { cam, attempt }).is_err() {
                        debug!(%cam, "feed failure dropped, runtime gone");
                    }
                }
            }
        });
    }
}
