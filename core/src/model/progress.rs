use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level phases of an analysis run, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Upload,
    Processing,
    Trajectory,
    Analysis,
    Complete,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Upload => "upload",
            Stage::Processing => "processing",
            Stage::Trajectory => "trajectory",
            Stage::Analysis => "analysis",
            Stage::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress notification handed to a run's observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub progress: u8,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(stage: Stage, progress: u8, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: progress.min(100),
            message: message.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete && self.progress == 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_capped_at_one_hundred() {
        let event = ProgressEvent::new(Stage::Complete, 140, "done");
        assert_eq!(event.progress, 100);
        assert!(event.is_complete());
    }

    #[test]
    fn stage_serializes_lowercase() {
        let json = serde_json::to_string(&ProgressEvent::new(Stage::Trajectory, 74, "x")).unwrap();
        assert!(json.contains("\"stage\":\"trajectory\""));
    }
}
