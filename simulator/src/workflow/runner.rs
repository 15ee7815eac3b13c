use crate::capture::clip::VideoClip;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use athletehub_core::model::{ProgressEvent, ResultExport};
use athletehub_core::pipeline::{Analyzer, MockSynthesizer, TokioPace};
use athletehub_core::store::{FileStore, KeyValueStore, MemoryStore};
use athletehub_core::telemetry::MetricsSnapshot;
use athletehub_core::{AnalysisKind, AnalysisResult, ResultLookup, ResultNamespace};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub type DriverAnalyzer = Analyzer<TokioPace, MockSynthesizer<StdRng>>;

/// Owns the configured pipeline and exposes it to the CLI and the HTTP bridge.
#[derive(Clone)]
pub struct Runner {
    analyzer: Arc<DriverAnalyzer>,
}

impl Runner {
    pub fn new(config: &WorkflowConfig) -> anyhow::Result<Self> {
        let backend: Arc<dyn KeyValueStore> = match &config.store_dir {
            Some(dir) => Arc::new(
                FileStore::open(dir)
                    .with_context(|| format!("opening result store {}", dir.display()))?,
            ),
            None => Arc::new(MemoryStore::new()),
        };

        let synthesizer = match config.seed {
            Some(seed) => MockSynthesizer::seeded(seed),
            None => MockSynthesizer::from_entropy(),
        }
        .with_profiles(config.profiles.clone());

        let analyzer = Analyzer::new(TokioPace::scaled(config.pace_scale), synthesizer, backend)
            .with_demo_video_url(config.demo_video_url.clone());

        Ok(Self {
            analyzer: Arc::new(analyzer),
        })
    }

    /// Runs a clip through the pipeline, reporting each step to `on_progress`.
    pub async fn analyze<F>(
        &self,
        kind: AnalysisKind,
        clip: &VideoClip,
        mut on_progress: F,
        cancel: &CancellationToken,
    ) -> anyhow::Result<AnalysisResult>
    where
        F: FnMut(&ProgressEvent) + Send,
    {
        let result = self
            .analyzer
            .analyze(kind, clip.to_input(), &mut on_progress, cancel)
            .await
            .with_context(|| format!("analyzing {} clip of {} bytes", kind, clip.size_bytes))?;
        Ok(result)
    }

    pub fn lookup(
        &self,
        namespace: ResultNamespace,
        session_id: &str,
    ) -> anyhow::Result<ResultLookup> {
        self.analyzer
            .lookup(namespace, session_id)
            .with_context(|| format!("looking up session {}", session_id))
    }

    pub fn lookup_any(&self, session_id: &str) -> anyhow::Result<ResultLookup> {
        self.analyzer
            .lookup_any(session_id)
            .with_context(|| format!("looking up session {}", session_id))
    }

    pub fn export(&self, session_id: &str) -> anyhow::Result<(ResultExport, bool)> {
        let lookup = self.lookup_any(session_id)?;
        Ok((ResultExport::from(lookup.result()), lookup.is_demo()))
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.analyzer.metrics().snapshot()
    }
}
