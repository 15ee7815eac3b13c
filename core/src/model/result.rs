use crate::model::trajectory::TrajectoryPoint;
use crate::prelude::AnalysisKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CricketDiscipline {
    Bowling,
    Batting,
}

impl CricketDiscipline {
    pub fn kind(self) -> AnalysisKind {
        match self {
            CricketDiscipline::Bowling => AnalysisKind::CricketBowling,
            CricketDiscipline::Batting => AnalysisKind::CricketBatting,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeamPosition {
    Upright,
    Scrambled,
    CrossSeam,
}

impl SeamPosition {
    pub const ALL: [SeamPosition; 3] = [
        SeamPosition::Upright,
        SeamPosition::Scrambled,
        SeamPosition::CrossSeam,
    ];
}

impl fmt::Display for SeamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeamPosition::Upright => "upright",
            SeamPosition::Scrambled => "scrambled",
            SeamPosition::CrossSeam => "cross-seam",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactPoint {
    #[serde(rename = "front foot")]
    FrontFoot,
    #[serde(rename = "back foot")]
    BackFoot,
    #[serde(rename = "on the crease")]
    OnTheCrease,
}

impl ContactPoint {
    pub const ALL: [ContactPoint; 3] = [
        ContactPoint::FrontFoot,
        ContactPoint::BackFoot,
        ContactPoint::OnTheCrease,
    ];
}

impl fmt::Display for ContactPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactPoint::FrontFoot => "front foot",
            ContactPoint::BackFoot => "back foot",
            ContactPoint::OnTheCrease => "on the crease",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    Drive,
    Pull,
    Cut,
    Sweep,
    Flick,
}

impl ShotType {
    pub const ALL: [ShotType; 5] = [
        ShotType::Drive,
        ShotType::Pull,
        ShotType::Cut,
        ShotType::Sweep,
        ShotType::Flick,
    ];
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShotType::Drive => "drive",
            ShotType::Pull => "pull",
            ShotType::Cut => "cut",
            ShotType::Sweep => "sweep",
            ShotType::Flick => "flick",
        })
    }
}

/// Persisted outcome of a run. Cricket-only fields stay `None` (and are
/// omitted from JSON) for free-kick results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<CricketDiscipline>,
    /// km/h
    pub max_speed: f64,
    pub avg_speed: f64,
    pub ball_detected: bool,
    pub trajectory_points: u32,
    pub accuracy: u8,

    /// degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swing_movement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_position: Option<SeamPosition>,
    /// cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce_height: Option<f64>,
    /// m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_length: Option<f64>,
    /// m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_power: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,

    /// m
    pub distance: f64,
    /// s
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_video_url: Option<String>,
    /// s
    pub processing_time: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trajectory_data: Option<Vec<TrajectoryPoint>>,
}

impl AnalysisResult {
    pub fn kind(&self) -> AnalysisKind {
        self.analysis_type
            .map(CricketDiscipline::kind)
            .unwrap_or(AnalysisKind::Freekick)
    }

    /// Checks the structural invariants every stored record must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.session_id.is_empty() {
            return Err("empty session id".into());
        }
        if !self.max_speed.is_finite() || !self.avg_speed.is_finite() {
            return Err("non-finite speed".into());
        }
        if self.avg_speed > self.max_speed {
            return Err(format!(
                "average speed {} exceeds max speed {}",
                self.avg_speed, self.max_speed
            ));
        }
        if self.accuracy > 100 {
            return Err(format!("accuracy {} out of range", self.accuracy));
        }
        if let Some(points) = &self.trajectory_data {
            if points.len() != self.trajectory_points as usize {
                return Err(format!(
                    "trajectory has {} points, expected {}",
                    points.len(),
                    self.trajectory_points
                ));
            }
            if points
                .windows(2)
                .any(|pair| pair[1].timestamp < pair[0].timestamp)
            {
                return Err("trajectory timestamps decrease".into());
            }
        }
        Ok(())
    }
}
