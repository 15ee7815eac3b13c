use crate::model::{AnalysisJob, AnalysisResult, ProgressEvent};
use crate::prelude::AnalysisError;
use log::{debug, info, warn};

/// Structured log lines for the lifecycle of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLog;

impl RunLog {
    pub fn new() -> Self {
        Self
    }

    pub fn started(&self, job: &AnalysisJob) {
        info!(
            "run {} started kind={} input_bytes={}",
            job.session_id, job.kind, job.input_size_bytes
        );
    }

    pub fn progress(&self, session_id: &str, event: &ProgressEvent) {
        debug!(
            "run {} [{}] {}% {}",
            session_id, event.stage, event.progress, event.message
        );
    }

    pub fn completed(&self, result: &AnalysisResult) {
        info!(
            "run {} complete max_speed={} avg_speed={} ball_detected={} points={}",
            result.session_id,
            result.max_speed,
            result.avg_speed,
            result.ball_detected,
            result.trajectory_points
        );
    }

    pub fn cancelled(&self, session_id: &str) {
        info!("run {} cancelled, nothing stored", session_id);
    }

    pub fn failed(&self, session_id: &str, error: &AnalysisError) {
        warn!("run {} failed: {}", session_id, error);
    }

    pub fn fallback(&self, key: &str) {
        info!("no stored result under {}, serving demo record", key);
    }
}
