pub mod analyzer;
pub mod emitter;
pub mod pace;
pub mod profile;
pub mod script;
pub mod synthesizer;

pub use analyzer::Analyzer;
pub use emitter::ProgressEmitter;
pub use pace::{InstantPace, TokioPace};
pub use profile::{ProfileTable, SynthesisProfile, TrajectoryShape};
pub use script::{StagePlan, StageScript};
pub use synthesizer::MockSynthesizer;
