use crate::math::Span;
use crate::model::{AnalysisResult, CricketDiscipline, SeamPosition};
use crate::store::results::ResultNamespace;
use chrono::Utc;
use rand::Rng;

/// Clip shown on results pages that have no stored record.
pub const DEMO_VIDEO_URL: &str =
    "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_1mb.mp4";

/// Builds the record a results page shows when nothing is stored for `session_id`.
///
/// The cricket namespace always yields a bowling record. No trajectory data is
/// attached and the ball is always reported as detected.
pub fn demo_result<R: Rng + ?Sized>(
    namespace: ResultNamespace,
    session_id: &str,
    video_url: Option<&str>,
    rng: &mut R,
) -> AnalysisResult {
    let video = Some(video_url.unwrap_or(DEMO_VIDEO_URL).to_string());
    let base = AnalysisResult {
        session_id: session_id.to_string(),
        ball_detected: true,
        timestamp: Utc::now(),
        processed_video_url: video.clone(),
        original_video_url: video,
        ..Default::default()
    };

    match namespace {
        ResultNamespace::Analysis => AnalysisResult {
            max_speed: Span::new(78.5, 88.5).sample(rng),
            avg_speed: Span::new(65.2, 73.2).sample(rng),
            trajectory_points: 42 + rng.gen_range(0..20),
            accuracy: 88 + rng.gen_range(0..12),
            distance: Span::new(24.5, 29.5).sample(rng),
            duration: Span::new(2.3, 3.3).sample(rng),
            processing_time: 3.1,
            ..base
        },
        ResultNamespace::CricketAnalysis => AnalysisResult {
            analysis_type: Some(CricketDiscipline::Bowling),
            max_speed: Span::new(135.0, 150.0).sample(rng),
            avg_speed: Span::new(125.0, 135.0).sample(rng),
            trajectory_points: 45 + rng.gen_range(0..25),
            accuracy: 92 + rng.gen_range(0..8),
            distance: Span::new(20.5, 22.5).sample(rng),
            duration: Span::new(1.2, 1.7).sample(rng),
            swing_movement: Some(Span::new(0.0, 12.0).sample(rng)),
            seam_position: Some(SeamPosition::Upright),
            bounce_height: Some(Span::new(75.0, 95.0).sample(rng)),
            pitch_length: Some(Span::new(20.0, 22.0).sample(rng)),
            release_height: Some(Span::new(2.4, 2.6).sample(rng)),
            processing_time: 4.2,
            ..base
        },
    }
}
