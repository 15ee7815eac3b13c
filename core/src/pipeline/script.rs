use crate::math::StatsHelper;
use crate::model::{ProgressEvent, Stage};
use crate::prelude::AnalysisKind;
use std::time::Duration;

const UPLOAD_STEP: Duration = Duration::from_millis(200);
const FREEKICK_PROCESSING_STEP: Duration = Duration::from_millis(300);
const CRICKET_PROCESSING_STEP: Duration = Duration::from_millis(350);
const TRAJECTORY_STEP: Duration = Duration::from_millis(400);
const SETTLE: Duration = Duration::from_millis(500);

const FREEKICK_PROCESSING: [&str; 12] = [
    "Loading YOLO model weights...",
    "Setting confidence threshold to 0.3...",
    "Processing frame 1/120...",
    "Ball detected in frame 15...",
    "Processing frame 30/120...",
    "Ball detected in frame 45...",
    "Processing frame 60/120...",
    "Ball detected in frame 75...",
    "Processing frame 90/120...",
    "Ball detected in frame 105...",
    "Processing frame 120/120...",
    "YOLO detection complete!",
];

const FREEKICK_TRAJECTORY: [&str; 5] = [
    "Drawing ball trajectory path...",
    "Adding bounding boxes...",
    "Calculating speed annotations...",
    "Rendering trajectory video...",
    "Encoding output video...",
];

const BOWLING_PROCESSING: [&str; 8] = [
    "Loading cricket ball detection model...",
    "Detecting bowling action...",
    "Tracking ball from release point...",
    "Analyzing seam position...",
    "Measuring swing movement...",
    "Calculating pitch length...",
    "Processing delivery frames...",
    "Cricket bowling analysis complete!",
];

const BATTING_PROCESSING: [&str; 8] = [
    "Loading cricket ball detection model...",
    "Detecting batting stroke...",
    "Tracking ball after contact...",
    "Analyzing shot power...",
    "Identifying shot type...",
    "Measuring ball trajectory...",
    "Processing batting frames...",
    "Cricket batting analysis complete!",
];

const BOWLING_TRAJECTORY: [&str; 5] = [
    "Calculating swing degrees...",
    "Analyzing seam orientation...",
    "Measuring bounce characteristics...",
    "Computing speed variations...",
    "Generating bowling trajectory...",
];

const BATTING_TRAJECTORY: [&str; 5] = [
    "Analyzing shot power...",
    "Identifying contact point...",
    "Classifying shot type...",
    "Measuring ball distance...",
    "Generating batting trajectory...",
];

/// One top-level stage: an announcement, then paced sub-steps.
#[derive(Debug, Clone, PartialEq)]
pub struct StagePlan {
    pub announce: ProgressEvent,
    pub steps: Vec<ProgressEvent>,
    pub step_delay: Duration,
}

impl StagePlan {
    pub fn stage(&self) -> Stage {
        self.announce.stage
    }

    fn interpolated(
        stage: Stage,
        announce: &str,
        band: (u8, u8),
        messages: &[&str],
        step_delay: Duration,
    ) -> Self {
        let (start, end) = band;
        let steps = messages
            .iter()
            .enumerate()
            .map(|(index, message)| {
                let progress =
                    StatsHelper::interpolate(start as f64, end as f64, index, messages.len())
                        .round() as u8;
                ProgressEvent::new(stage, progress, *message)
            })
            .collect();

        Self {
            announce: ProgressEvent::new(stage, start, announce),
            steps,
            step_delay,
        }
    }
}

/// Fixed, forward-only progress script for one analysis kind.
#[derive(Debug, Clone, PartialEq)]
pub struct StageScript {
    pub stages: Vec<StagePlan>,
    /// Pause after the last stage, before the result is synthesized.
    pub settle_delay: Duration,
    pub completion: ProgressEvent,
}

impl StageScript {
    pub fn for_kind(kind: AnalysisKind) -> Self {
        let cricket = kind.is_cricket();
        let subject = if cricket { "cricket video" } else { "video" };

        let upload = StagePlan {
            announce: ProgressEvent::new(
                Stage::Upload,
                10,
                format!("Uploading {} to server...", subject),
            ),
            steps: (10..=25)
                .step_by(3)
                .map(|pct| {
                    ProgressEvent::new(
                        Stage::Upload,
                        pct,
                        format!("Uploading {}... {}%", subject, pct),
                    )
                })
                .collect(),
            step_delay: UPLOAD_STEP,
        };

        let (processing_announce, processing, processing_delay): (&str, &[&str], Duration) =
            match kind {
                AnalysisKind::Freekick => (
                    "Initializing YOLO model...",
                    &FREEKICK_PROCESSING[..],
                    FREEKICK_PROCESSING_STEP,
                ),
                AnalysisKind::CricketBowling => (
                    "Initializing cricket ball detection model...",
                    &BOWLING_PROCESSING[..],
                    CRICKET_PROCESSING_STEP,
                ),
                AnalysisKind::CricketBatting => (
                    "Initializing cricket ball detection model...",
                    &BATTING_PROCESSING[..],
                    CRICKET_PROCESSING_STEP,
                ),
            };

        let (trajectory_announce, trajectory): (&str, &[&str]) = match kind {
            AnalysisKind::Freekick => (
                "Generating trajectory visualization...",
                &FREEKICK_TRAJECTORY[..],
            ),
            AnalysisKind::CricketBowling => (
                "Analyzing ball movement and cricket metrics...",
                &BOWLING_TRAJECTORY[..],
            ),
            AnalysisKind::CricketBatting => (
                "Analyzing ball movement and cricket metrics...",
                &BATTING_TRAJECTORY[..],
            ),
        };

        let analysis = StagePlan {
            announce: ProgressEvent::new(
                Stage::Analysis,
                90,
                if cricket {
                    "Calculating cricket performance metrics..."
                } else {
                    "Calculating speed and trajectory metrics..."
                },
            ),
            steps: Vec::new(),
            step_delay: Duration::ZERO,
        };

        let completion = ProgressEvent::new(
            Stage::Complete,
            100,
            if cricket {
                "Cricket analysis complete!"
            } else {
                "Analysis complete! Video with trajectory ready."
            },
        );

        Self {
            stages: vec![
                upload,
                StagePlan::interpolated(
                    Stage::Processing,
                    processing_announce,
                    (30, 70),
                    processing,
                    processing_delay,
                ),
                StagePlan::interpolated(
                    Stage::Trajectory,
                    trajectory_announce,
                    (70, 90),
                    trajectory,
                    TRAJECTORY_STEP,
                ),
                analysis,
            ],
            settle_delay: SETTLE,
            completion,
        }
    }

    /// Every event in emission order, completion included.
    pub fn events(&self) -> impl Iterator<Item = &ProgressEvent> {
        self.stages
            .iter()
            .flat_map(|plan| std::iter::once(&plan.announce).chain(plan.steps.iter()))
            .chain(std::iter::once(&self.completion))
    }

    /// Sum of all pauses a run of this script will take.
    pub fn total_delay(&self) -> Duration {
        self.stages
            .iter()
            .map(|plan| plan.step_delay * plan.steps.len() as u32)
            .sum::<Duration>()
            + self.settle_delay
    }
}
