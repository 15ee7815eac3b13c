use serde::{Deserialize, Serialize};

/// A synthetic plot sample of the ball path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    /// Seconds from the start of the run.
    pub timestamp: f64,
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swing_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_angle: Option<f64>,
}

impl TrajectoryPoint {
    pub fn new(x: f64, y: f64, timestamp: f64, speed: f64) -> Self {
        Self {
            x,
            y,
            timestamp,
            speed,
            swing_angle: None,
            seam_angle: None,
        }
    }

    pub fn with_angles(mut self, swing_angle: f64, seam_angle: f64) -> Self {
        self.swing_angle = Some(swing_angle);
        self.seam_angle = Some(seam_angle);
        self
    }
}
