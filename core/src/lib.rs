//! Analysis pipeline core for the AthleteHub sports-video dashboard.
//!
//! A run walks a fixed stage script per analysis kind, synthesizes a metrics
//! record from the input clip, and persists it under a namespaced session key
//! so the results surface can read it back (or fall back to a demo record).

pub mod math;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod session;
pub mod store;
pub mod telemetry;

pub use model::{AnalysisJob, AnalysisResult, ProgressEvent, Stage, TrajectoryPoint};
pub use pipeline::{Analyzer, MockSynthesizer, ProgressEmitter};
pub use prelude::{AnalysisError, AnalysisKind, PipelineResult, ResultSynthesizer};
pub use store::{ResultLookup, ResultNamespace, ResultStore};
