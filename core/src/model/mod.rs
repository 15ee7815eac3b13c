pub mod export;
pub mod job;
pub mod progress;
pub mod result;
pub mod trajectory;

pub use export::ResultExport;
pub use job::{AnalysisJob, VideoInput};
pub use progress::{ProgressEvent, Stage};
pub use result::{AnalysisResult, ContactPoint, CricketDiscipline, SeamPosition, ShotType};
pub use trajectory::TrajectoryPoint;
