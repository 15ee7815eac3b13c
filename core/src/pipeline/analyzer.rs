use crate::model::{AnalysisJob, AnalysisResult, ProgressEvent, VideoInput};
use crate::pipeline::emitter::ProgressEmitter;
use crate::prelude::{
    AnalysisError, AnalysisKind, Pace, PipelineResult, ProgressSink, ResultSynthesizer,
};
use crate::store::{KeyValueStore, ResultLookup, ResultNamespace, ResultStore};
use crate::telemetry::{MetricsRecorder, RunLog};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// End-to-end driver: session id, stage script, synthesis, persistence.
pub struct Analyzer<P: Pace, Y: ResultSynthesizer> {
    pace: P,
    synthesizer: Mutex<Y>,
    backend: Arc<dyn KeyValueStore>,
    demo_video_url: Option<String>,
    log: RunLog,
    metrics: MetricsRecorder,
}

impl<P, Y> Analyzer<P, Y>
where
    P: Pace + Clone,
    Y: ResultSynthesizer,
{
    pub fn new(pace: P, synthesizer: Y, backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            pace,
            synthesizer: Mutex::new(synthesizer),
            backend,
            demo_video_url: None,
            log: RunLog::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn with_demo_video_url(mut self, url: Option<String>) -> Self {
        self.demo_video_url = url;
        self
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn store(&self, namespace: ResultNamespace) -> ResultStore {
        ResultStore::new(self.backend.clone(), namespace)
    }

    /// Runs one analysis with a freshly minted session id.
    ///
    /// Any failure surfaces as [`AnalysisError::AnalysisFailed`] (or
    /// [`AnalysisError::Cancelled`]) and leaves the store untouched.
    pub async fn analyze<S>(
        &self,
        kind: AnalysisKind,
        input: VideoInput,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> PipelineResult<AnalysisResult>
    where
        S: ProgressSink + Send + ?Sized,
    {
        self.run_job(AnalysisJob::new(kind, input), sink, cancel)
            .await
    }

    pub async fn run_job<S>(
        &self,
        job: AnalysisJob,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> PipelineResult<AnalysisResult>
    where
        S: ProgressSink + Send + ?Sized,
    {
        self.log.started(&job);
        let log = self.log;
        let session_id = job.session_id.clone();
        let mut observed = |event: &ProgressEvent| {
            log.progress(&session_id, event);
            sink.on_progress(event);
        };

        match self.execute(&job, &mut observed, cancel).await {
            Ok(result) => {
                self.metrics.record_completed();
                self.log.completed(&result);
                Ok(result)
            }
            Err(AnalysisError::Cancelled) => {
                self.metrics.record_cancelled();
                self.log.cancelled(&job.session_id);
                Err(AnalysisError::Cancelled)
            }
            Err(err) => {
                self.metrics.record_failed();
                self.log.failed(&job.session_id, &err);
                Err(match err {
                    AnalysisError::AnalysisFailed(reason) => AnalysisError::AnalysisFailed(reason),
                    other => AnalysisError::AnalysisFailed(other.to_string()),
                })
            }
        }
    }

    async fn execute<S>(
        &self,
        job: &AnalysisJob,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> PipelineResult<AnalysisResult>
    where
        S: ProgressSink + Send + ?Sized,
    {
        let emitter = ProgressEmitter::for_kind(job.kind, self.pace.clone());
        emitter.run(sink, cancel).await?;

        let result = {
            let mut synthesizer = self.synthesizer.lock().await;
            synthesizer.synthesize(job).await?
        };
        result.validate().map_err(AnalysisError::AnalysisFailed)?;

        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        self.store(ResultNamespace::for_kind(job.kind))
            .save(&result)?;
        emitter.complete(sink);
        Ok(result)
    }

    /// What a results page shows for `session_id`: the stored record or a demo one.
    pub fn lookup(
        &self,
        namespace: ResultNamespace,
        session_id: &str,
    ) -> PipelineResult<ResultLookup> {
        let lookup = self.store(namespace).lookup_or_demo(
            session_id,
            self.demo_video_url.as_deref(),
            &mut rand::thread_rng(),
        )?;
        if lookup.is_demo() {
            self.metrics.record_fallback();
            self.log.fallback(&namespace.key(session_id));
        }
        Ok(lookup)
    }

    /// Tries the namespace implied by the id prefix, then the other, then falls back.
    pub fn lookup_any(&self, session_id: &str) -> PipelineResult<ResultLookup> {
        let preferred = if session_id.starts_with(AnalysisKind::CricketBowling.session_prefix()) {
            [ResultNamespace::CricketAnalysis, ResultNamespace::Analysis]
        } else {
            [ResultNamespace::Analysis, ResultNamespace::CricketAnalysis]
        };
        for namespace in preferred {
            if let Some(result) = self.store(namespace).get(session_id)? {
                return Ok(ResultLookup::Stored(result));
            }
        }
        self.lookup(preferred[0], session_id)
    }
}
