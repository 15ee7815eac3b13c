use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one reachability check against the live-detection service.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionStatus {
    pub url: String,
    pub reachable: bool,
    /// HTTP status when the service answered at all.
    pub status: Option<u16>,
    pub checked_at: DateTime<Utc>,
}

/// Client for an externally deployed live-detection service.
pub struct DetectionProbe {
    client: reqwest::Client,
    base_url: String,
}

impl DetectionProbe {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .context("building detection probe client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// MJPEG stream endpoint the dashboard embeds while detection is running.
    pub fn video_feed_url(&self) -> String {
        format!("{}/video_feed", self.base_url)
    }

    /// Any HTTP answer counts as reachable; transport errors do not.
    pub async fn check(&self) -> DetectionStatus {
        let outcome = self.client.head(&self.base_url).send().await;
        let checked_at = Utc::now();
        match outcome {
            Ok(response) => {
                let status = response.status().as_u16();
                info!("detection service {} answered {}", self.base_url, status);
                DetectionStatus {
                    url: self.base_url.clone(),
                    reachable: true,
                    status: Some(status),
                    checked_at,
                }
            }
            Err(err) => {
                warn!("detection service {} unreachable: {}", self.base_url, err);
                DetectionStatus {
                    url: self.base_url.clone(),
                    reachable: false,
                    status: None,
                    checked_at,
                }
            }
        }
    }
}
