use crate::pipeline::script::StageScript;
use crate::prelude::{AnalysisError, AnalysisKind, Pace, PipelineResult, ProgressSink};
use tokio_util::sync::CancellationToken;

/// Walks a [`StageScript`], pausing between sub-steps and reporting each event.
///
/// Cancellation is cooperative: the token is checked after every pause and
/// before every announcement, so an in-flight step always finishes.
pub struct ProgressEmitter<P: Pace> {
    script: StageScript,
    pace: P,
}

impl<P: Pace> ProgressEmitter<P> {
    pub fn new(script: StageScript, pace: P) -> Self {
        Self { script, pace }
    }

    pub fn for_kind(kind: AnalysisKind, pace: P) -> Self {
        Self::new(StageScript::for_kind(kind), pace)
    }

    pub fn script(&self) -> &StageScript {
        &self.script
    }

    /// Emits every stage up to and including `analysis`, then settles.
    pub async fn run<S>(&self, sink: &mut S, cancel: &CancellationToken) -> PipelineResult<()>
    where
        S: ProgressSink + Send + ?Sized,
    {
        for plan in &self.script.stages {
            ensure_live(cancel)?;
            sink.on_progress(&plan.announce);
            for step in &plan.steps {
                self.pace.pause(plan.step_delay).await;
                ensure_live(cancel)?;
                sink.on_progress(step);
            }
        }
        self.pace.pause(self.script.settle_delay).await;
        ensure_live(cancel)
    }

    /// Emits the terminal `complete` event.
    pub fn complete<S>(&self, sink: &mut S)
    where
        S: ProgressSink + ?Sized,
    {
        sink.on_progress(&self.script.completion);
    }
}

fn ensure_live(cancel: &CancellationToken) -> PipelineResult<()> {
    if cancel.is_cancelled() {
        Err(AnalysisError::Cancelled)
    } else {
        Ok(())
    }
}
