use crate::math::Span;
use crate::prelude::AnalysisKind;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Vertical path of the synthetic trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TrajectoryShape {
    /// `origin - slope * i + U(0, noise)`
    Descending { origin: f64, slope: f64, noise: f64 },
    /// `origin + amplitude * sin(frequency * i) + U(0, noise)`
    Arc {
        origin: f64,
        amplitude: f64,
        frequency: f64,
        noise: f64,
    },
}

impl TrajectoryShape {
    pub fn y_at<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> f64 {
        let i = index as f64;
        match *self {
            TrajectoryShape::Descending {
                origin,
                slope,
                noise,
            } => origin - slope * i + Span::new(0.0, noise).sample(rng),
            TrajectoryShape::Arc {
                origin,
                amplitude,
                frequency,
                noise,
            } => origin + (frequency * i).sin() * amplitude + Span::new(0.0, noise).sample(rng),
        }
    }
}

/// Literal constants driving metric synthesis for one analysis kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisProfile {
    /// `base = base_speed + (input bytes mod speed_modulus)`
    pub base_speed: f64,
    pub speed_modulus: u64,
    pub speed_floor: f64,
    /// Half-width of the symmetric speed variation.
    pub speed_jitter: f64,
    /// Upper bound of the extra non-negative speed boost.
    pub speed_boost: f64,
    pub avg_fraction: Span,
    pub trajectory_points: Span,
    pub accuracy: Span,
    pub distance: Span,
    pub duration: Span,
    pub processing_time: Span,
    pub detection_rate: f64,
    pub x_origin: f64,
    pub x_step: f64,
    pub x_noise: f64,
    pub shape: TrajectoryShape,
    /// Half-width of per-point speed noise around the average.
    pub speed_noise: f64,
}

impl SynthesisProfile {
    pub fn freekick() -> Self {
        Self {
            base_speed: 45.0,
            speed_modulus: 40,
            speed_floor: 30.0,
            speed_jitter: 10.0,
            speed_boost: 15.0,
            avg_fraction: Span::new(0.7, 0.9),
            trajectory_points: Span::new(20.0, 60.0),
            accuracy: Span::new(85.0, 100.0),
            distance: Span::new(15.0, 35.0),
            duration: Span::new(1.5, 3.5),
            processing_time: Span::new(2.5, 4.5),
            detection_rate: 0.90,
            x_origin: 100.0,
            x_step: 10.0,
            x_noise: 20.0,
            shape: TrajectoryShape::Descending {
                origin: 300.0,
                slope: 5.0,
                noise: 30.0,
            },
            speed_noise: 10.0,
        }
    }

    pub fn cricket_bowling() -> Self {
        Self {
            base_speed: 120.0,
            speed_modulus: 30,
            speed_floor: 100.0,
            avg_fraction: Span::new(0.8, 0.95),
            trajectory_points: Span::new(30.0, 80.0),
            accuracy: Span::new(88.0, 100.0),
            distance: Span::new(20.0, 22.0),
            duration: Span::new(0.8, 1.2),
            processing_time: Span::new(3.0, 5.0),
            detection_rate: 0.95,
            x_step: 8.0,
            x_noise: 15.0,
            shape: TrajectoryShape::Descending {
                origin: 300.0,
                slope: 3.0,
                noise: 20.0,
            },
            speed_noise: 12.5,
            ..Self::freekick()
        }
    }

    pub fn cricket_batting() -> Self {
        Self {
            base_speed: 80.0,
            speed_modulus: 40,
            speed_floor: 60.0,
            distance: Span::new(50.0, 150.0),
            duration: Span::new(2.0, 5.0),
            shape: TrajectoryShape::Arc {
                origin: 200.0,
                amplitude: 50.0,
                frequency: 0.2,
                noise: 10.0,
            },
            ..Self::cricket_bowling()
        }
    }

    pub fn base_speed_for(&self, input_size_bytes: u64) -> f64 {
        self.base_speed + (input_size_bytes % self.speed_modulus.max(1)) as f64
    }
}

/// Sparse form of [`SynthesisProfile`] read from config; unset fields keep
/// the kind's built-in value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProfileOverride {
    base_speed: Option<f64>,
    speed_modulus: Option<u64>,
    speed_floor: Option<f64>,
    speed_jitter: Option<f64>,
    speed_boost: Option<f64>,
    avg_fraction: Option<Span>,
    trajectory_points: Option<Span>,
    accuracy: Option<Span>,
    distance: Option<Span>,
    duration: Option<Span>,
    processing_time: Option<Span>,
    detection_rate: Option<f64>,
    x_origin: Option<f64>,
    x_step: Option<f64>,
    x_noise: Option<f64>,
    shape: Option<TrajectoryShape>,
    speed_noise: Option<f64>,
}

impl ProfileOverride {
    fn apply(self, base: SynthesisProfile) -> SynthesisProfile {
        SynthesisProfile {
            base_speed: self.base_speed.unwrap_or(base.base_speed),
            speed_modulus: self.speed_modulus.unwrap_or(base.speed_modulus),
            speed_floor: self.speed_floor.unwrap_or(base.speed_floor),
            speed_jitter: self.speed_jitter.unwrap_or(base.speed_jitter),
            speed_boost: self.speed_boost.unwrap_or(base.speed_boost),
            avg_fraction: self.avg_fraction.unwrap_or(base.avg_fraction),
            trajectory_points: self.trajectory_points.unwrap_or(base.trajectory_points),
            accuracy: self.accuracy.unwrap_or(base.accuracy),
            distance: self.distance.unwrap_or(base.distance),
            duration: self.duration.unwrap_or(base.duration),
            processing_time: self.processing_time.unwrap_or(base.processing_time),
            detection_rate: self.detection_rate.unwrap_or(base.detection_rate),
            x_origin: self.x_origin.unwrap_or(base.x_origin),
            x_step: self.x_step.unwrap_or(base.x_step),
            x_noise: self.x_noise.unwrap_or(base.x_noise),
            shape: self.shape.unwrap_or(base.shape),
            speed_noise: self.speed_noise.unwrap_or(base.speed_noise),
        }
    }
}

fn freekick_profile<'de, D: Deserializer<'de>>(d: D) -> Result<SynthesisProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.apply(SynthesisProfile::freekick()))
}

fn bowling_profile<'de, D: Deserializer<'de>>(d: D) -> Result<SynthesisProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.apply(SynthesisProfile::cricket_bowling()))
}

fn batting_profile<'de, D: Deserializer<'de>>(d: D) -> Result<SynthesisProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.apply(SynthesisProfile::cricket_batting()))
}

/// Per-kind profiles. Each kind, and each field within it, may be left out of
/// a config file and keeps its built-in value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileTable {
    #[serde(deserialize_with = "freekick_profile")]
    pub freekick: SynthesisProfile,
    #[serde(deserialize_with = "bowling_profile")]
    pub cricket_bowling: SynthesisProfile,
    #[serde(deserialize_with = "batting_profile")]
    pub cricket_batting: SynthesisProfile,
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self {
            freekick: SynthesisProfile::freekick(),
            cricket_bowling: SynthesisProfile::cricket_bowling(),
            cricket_batting: SynthesisProfile::cricket_batting(),
        }
    }
}

impl ProfileTable {
    pub fn get(&self, kind: AnalysisKind) -> &SynthesisProfile {
        match kind {
            AnalysisKind::Freekick => &self.freekick,
            AnalysisKind::CricketBowling => &self.cricket_bowling,
            AnalysisKind::CricketBatting => &self.cricket_batting,
        }
    }
}
