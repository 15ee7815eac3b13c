use crate::math::{Span, StatsHelper};
use crate::model::{
    AnalysisJob, AnalysisResult, ContactPoint, CricketDiscipline, SeamPosition, ShotType,
    TrajectoryPoint,
};
use crate::pipeline::profile::ProfileTable;
use crate::prelude::{PipelineResult, ResultSynthesizer};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::future::Future;

const SWING_MOVEMENT: Span = Span::new(0.0, 15.0);
const BOUNCE_HEIGHT: Span = Span::new(60.0, 100.0);
const PITCH_LENGTH: Span = Span::new(18.0, 22.0);
const RELEASE_HEIGHT: Span = Span::new(2.2, 2.6);
const SHOT_POWER: Span = Span::new(60.0, 100.0);
const SWING_ANGLE: Span = Span::new(-5.0, 5.0);
const SEAM_ANGLE: Span = Span::new(0.0, 360.0);

/// Fabricates plausible metrics for a clip, influenced only by its byte size.
pub struct MockSynthesizer<R: Rng> {
    rng: R,
    profiles: ProfileTable,
}

impl MockSynthesizer<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), ProfileTable::default())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), ProfileTable::default())
    }
}

impl<R: Rng> MockSynthesizer<R> {
    pub fn new(rng: R, profiles: ProfileTable) -> Self {
        Self { rng, profiles }
    }

    pub fn with_profiles(mut self, profiles: ProfileTable) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    pub fn generate(&mut self, job: &AnalysisJob) -> AnalysisResult {
        let profile = self.profiles.get(job.kind);
        let rng = &mut self.rng;

        let base_speed = profile.base_speed_for(job.input_size_bytes);
        let variation = Span::symmetric(profile.speed_jitter).sample(rng);
        let boost = Span::new(0.0, profile.speed_boost).sample(rng);
        let max_speed = (base_speed + variation + boost).max(profile.speed_floor);
        let avg_speed = max_speed * profile.avg_fraction.sample(rng);
        let trajectory_points = profile.trajectory_points.sample_floor(rng);
        let accuracy = profile.accuracy.sample_floor(rng).min(100) as u8;
        let distance = profile.distance.sample(rng);
        let duration = profile.duration.sample(rng);

        let discipline = job.kind.discipline();
        let step = if trajectory_points > 0 {
            duration / trajectory_points as f64
        } else {
            0.0
        };
        let speed_noise = Span::symmetric(profile.speed_noise);
        let trajectory_data: Vec<TrajectoryPoint> = (0..trajectory_points as usize)
            .map(|i| {
                let x = profile.x_origin
                    + i as f64 * profile.x_step
                    + Span::new(0.0, profile.x_noise).sample(rng);
                let y = profile.shape.y_at(i, rng);
                let point =
                    TrajectoryPoint::new(x, y, i as f64 * step, avg_speed + speed_noise.sample(rng));
                if discipline == Some(CricketDiscipline::Bowling) {
                    point.with_angles(SWING_ANGLE.sample(rng), SEAM_ANGLE.sample(rng))
                } else {
                    point
                }
            })
            .collect();

        let max_speed = StatsHelper::round_tenth(max_speed);
        let mut result = AnalysisResult {
            session_id: job.session_id.clone(),
            analysis_type: discipline,
            max_speed,
            avg_speed: StatsHelper::round_tenth(avg_speed).min(max_speed),
            ball_detected: rng.gen_bool(profile.detection_rate.clamp(0.0, 1.0)),
            trajectory_points,
            accuracy,
            distance: StatsHelper::round_tenth(distance),
            duration: StatsHelper::round_tenth(duration),
            processed_video_url: job.source_uri.clone(),
            original_video_url: job.source_uri.clone(),
            processing_time: profile.processing_time.sample(rng),
            timestamp: Utc::now(),
            trajectory_data: Some(trajectory_data),
            ..Default::default()
        };

        match discipline {
            Some(CricketDiscipline::Bowling) => {
                result.swing_movement = Some(SWING_MOVEMENT.sample(rng));
                result.seam_position = SeamPosition::ALL.choose(rng).copied();
                result.bounce_height = Some(BOUNCE_HEIGHT.sample(rng));
                result.pitch_length = Some(PITCH_LENGTH.sample(rng));
                result.release_height = Some(RELEASE_HEIGHT.sample(rng));
            }
            Some(CricketDiscipline::Batting) => {
                result.shot_power = Some(SHOT_POWER.sample_floor(rng).min(100) as u8);
                result.contact_point = ContactPoint::ALL.choose(rng).copied();
                result.shot_type = ShotType::ALL.choose(rng).copied();
            }
            None => {}
        }

        result
    }
}

impl<R: Rng + Send> ResultSynthesizer for MockSynthesizer<R> {
    fn synthesize(
        &mut self,
        job: &AnalysisJob,
    ) -> impl Future<Output = PipelineResult<AnalysisResult>> + Send {
        std::future::ready(Ok(self.generate(job)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VideoInput;
    use crate::prelude::AnalysisKind;

    fn job(kind: AnalysisKind, size: u64) -> AnalysisJob {
        AnalysisJob::with_session("session-test", kind, VideoInput::new(size))
    }

    #[test]
    fn freekick_results_hold_invariants() {
        let mut synth = MockSynthesizer::seeded(42);
        for size in [0u64, 17, 1_048_576, 9_999_999] {
            for _ in 0..50 {
                let result = synth.generate(&job(AnalysisKind::Freekick, size));
                assert!(result.validate().is_ok(), "{:?}", result.validate());
                assert!(result.max_speed >= 30.0);
                assert!(result.avg_speed <= result.max_speed);
                assert!(result.avg_speed >= StatsHelper::round_tenth(0.7 * result.max_speed) - 0.2);
                assert!((20..60).contains(&result.trajectory_points));
                assert!((85..=100).contains(&result.accuracy));
                assert!(result.analysis_type.is_none());
                assert!(result.swing_movement.is_none());
            }
        }
    }

    #[test]
    fn bowling_results_carry_bowling_metrics() {
        let mut synth = MockSynthesizer::seeded(7);
        for _ in 0..100 {
            let result = synth.generate(&job(AnalysisKind::CricketBowling, 4096));
            assert!(result.validate().is_ok());
            assert_eq!(result.analysis_type, Some(CricketDiscipline::Bowling));
            assert!(result.max_speed >= 100.0);
            assert!(SWING_MOVEMENT.contains(result.swing_movement.unwrap()));
            assert!(result.seam_position.is_some());
            assert!(BOUNCE_HEIGHT.contains(result.bounce_height.unwrap()));
            assert!((30..80).contains(&result.trajectory_points));
            assert!(result.shot_power.is_none());
            let data = result.trajectory_data.unwrap();
            assert!(data.iter().all(|p| p.swing_angle.is_some() && p.seam_angle.is_some()));
        }
    }

    #[test]
    fn batting_results_carry_batting_metrics_and_arc() {
        let mut synth = MockSynthesizer::seeded(9);
        for _ in 0..100 {
            let result = synth.generate(&job(AnalysisKind::CricketBatting, 4096));
            assert!(result.validate().is_ok());
            assert!(result.max_speed >= 60.0);
            assert!((60..100).contains(&result.shot_power.unwrap()));
            assert!(result.contact_point.is_some() && result.shot_type.is_some());
            assert!(result.bounce_height.is_none());
            for point in result.trajectory_data.unwrap() {
                assert!(point.y >= 150.0 && point.y < 260.0);
                assert!(point.swing_angle.is_none());
            }
        }
    }

    #[test]
    fn trajectory_timestamps_are_evenly_spaced() {
        let mut synth = MockSynthesizer::seeded(1);
        let result = synth.generate(&job(AnalysisKind::Freekick, 512));
        let data = result.trajectory_data.as_ref().unwrap();
        assert_eq!(data.len(), result.trajectory_points as usize);
        assert_eq!(data[0].timestamp, 0.0);
        let gap = data[1].timestamp - data[0].timestamp;
        for pair in data.windows(2) {
            assert!((pair[1].timestamp - pair[0].timestamp - gap).abs() < 1e-9);
        }
    }

    #[test]
    fn same_seed_reproduces_metrics() {
        let first = MockSynthesizer::seeded(2024).generate(&job(AnalysisKind::Freekick, 77));
        let second = MockSynthesizer::seeded(2024).generate(&job(AnalysisKind::Freekick, 77));
        assert_eq!(first.max_speed, second.max_speed);
        assert_eq!(first.trajectory_data, second.trajectory_data);
        assert_eq!(first.ball_detected, second.ball_detected);
    }

    #[test]
    fn source_uri_becomes_video_urls() {
        let mut synth = MockSynthesizer::seeded(5);
        let job = AnalysisJob::with_session(
            "session-uri",
            AnalysisKind::Freekick,
            VideoInput::new(10).with_uri("file:///clips/kick.webm"),
        );
        let result = synth.generate(&job);
        assert_eq!(
            result.original_video_url.as_deref(),
            Some("file:///clips/kick.webm")
        );
        assert_eq!(result.processed_video_url, result.original_video_url);
    }
}
