use crate::model::{AnalysisJob, AnalysisResult, CricketDiscipline, ProgressEvent};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Which stage script, synthesis profile and store namespace a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    Freekick,
    CricketBowling,
    CricketBatting,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::Freekick,
        AnalysisKind::CricketBowling,
        AnalysisKind::CricketBatting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::Freekick => "freekick",
            AnalysisKind::CricketBowling => "cricket-bowling",
            AnalysisKind::CricketBatting => "cricket-batting",
        }
    }

    /// Leading segment of every session id minted for this kind.
    pub fn session_prefix(self) -> &'static str {
        if self.is_cricket() {
            "cricket"
        } else {
            "session"
        }
    }

    pub fn is_cricket(self) -> bool {
        self.discipline().is_some()
    }

    pub fn discipline(self) -> Option<CricketDiscipline> {
        match self {
            AnalysisKind::Freekick => None,
            AnalysisKind::CricketBowling => Some(CricketDiscipline::Bowling),
            AnalysisKind::CricketBatting => Some(CricketDiscipline::Batting),
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = AnalysisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "freekick" => Ok(AnalysisKind::Freekick),
            "cricket-bowling" | "bowling" => Ok(AnalysisKind::CricketBowling),
            "cricket-batting" | "batting" => Ok(AnalysisKind::CricketBatting),
            other => Err(AnalysisError::InvalidInput(format!(
                "unknown analysis kind '{}'",
                other
            ))),
        }
    }
}

/// Reasons a video could not be captured or accepted for analysis.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureFault {
    #[error("no camera found on this device")]
    NoDevice,
    #[error("camera access denied")]
    PermissionDenied,
    #[error("unsupported recording format: {0}")]
    UnsupportedFormat(String),
    #[error("recording is empty")]
    EmptyRecording,
    #[error("video source unreadable: {0}")]
    Unreadable(String),
}

/// Common error type for the analysis pipeline.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("capture unavailable: {0}")]
    CaptureUnavailable(#[from] CaptureFault),
    #[error("video analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("analysis cancelled")]
    Cancelled,
    #[error("no analysis result stored for session {0}")]
    ResultNotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("result store failure: {0}")]
    Store(String),
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PipelineResult<T> = Result<T, AnalysisError>;

/// Suspension used between scripted steps. Swapped for a zero delay in tests.
pub trait Pace: Send + Sync {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Observer invoked synchronously for every emitted progress event.
pub trait ProgressSink {
    fn on_progress(&mut self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn on_progress(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Channel form of a progress sink; a dropped receiver is ignored.
pub struct ChannelSink {
    sender: UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelSink {
    fn on_progress(&mut self, event: &ProgressEvent) {
        let _ = self.sender.send(event.clone());
    }
}

/// Produces the final record for a job once the stage script has run.
///
/// The mock implementation fabricates metrics; a backend-backed one would
/// upload the clip and map the response without touching the emitter or store.
pub trait ResultSynthesizer: Send {
    fn synthesize(
        &mut self,
        job: &AnalysisJob,
    ) -> impl Future<Output = PipelineResult<AnalysisResult>> + Send;
}
