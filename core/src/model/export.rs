use crate::model::result::{AnalysisResult, ContactPoint, CricketDiscipline, SeamPosition, ShotType};
use crate::prelude::PipelineResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Human-readable summary offered as a download from the results page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultExport {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<CricketDiscipline>,
    pub timestamp: DateTime<Utc>,
    pub results: ExportMetrics,
    pub video_urls: ExportVideoUrls,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetrics {
    pub max_speed: String,
    pub avg_speed: String,
    pub distance: String,
    pub duration: String,
    pub trajectory_points: u32,
    pub accuracy: String,
    pub ball_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_movement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seam_position: Option<SeamPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounce_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_power: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportVideoUrls {
    pub processed: Option<String>,
    pub original: Option<String>,
}

impl ResultExport {
    pub fn file_name(&self) -> String {
        let family = if self.analysis_type.is_some() {
            "cricket"
        } else {
            "freekick"
        };
        format!("{}-analysis-{}.json", family, self.session_id)
    }

    pub fn to_json_pretty(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&AnalysisResult> for ResultExport {
    fn from(result: &AnalysisResult) -> Self {
        let bowling = result.analysis_type == Some(CricketDiscipline::Bowling);
        let batting = result.analysis_type == Some(CricketDiscipline::Batting);
        let with_unit = |value: Option<f64>, unit: &str| value.map(|v| format!("{}{}", v, unit));

        let results = ExportMetrics {
            max_speed: format!("{} km/h", result.max_speed),
            avg_speed: format!("{} km/h", result.avg_speed),
            distance: format!("{}m", result.distance),
            duration: format!("{}s", result.duration),
            trajectory_points: result.trajectory_points,
            accuracy: format!("{}%", result.accuracy),
            ball_detected: result.ball_detected,
            swing_movement: with_unit(result.swing_movement.filter(|_| bowling), "°"),
            seam_position: result.seam_position.filter(|_| bowling),
            bounce_height: with_unit(result.bounce_height.filter(|_| bowling), "cm"),
            pitch_length: with_unit(result.pitch_length.filter(|_| bowling), "m"),
            release_height: with_unit(result.release_height.filter(|_| bowling), "m"),
            shot_power: result.shot_power.filter(|_| batting),
            contact_point: result.contact_point.filter(|_| batting),
            shot_type: result.shot_type.filter(|_| batting),
        };

        Self {
            session_id: result.session_id.clone(),
            analysis_type: result.analysis_type,
            timestamp: result.timestamp,
            results,
            video_urls: ExportVideoUrls {
                processed: result.processed_video_url.clone(),
                original: result.original_video_url.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_formats_units() {
        let result = AnalysisResult {
            session_id: "session-9-x".into(),
            max_speed: 78.5,
            avg_speed: 65.0,
            distance: 24.5,
            duration: 2.3,
            accuracy: 92,
            trajectory_points: 40,
            ball_detected: true,
            ..Default::default()
        };

        let export = ResultExport::from(&result);
        assert_eq!(export.results.max_speed, "78.5 km/h");
        assert_eq!(export.results.avg_speed, "65 km/h");
        assert_eq!(export.results.distance, "24.5m");
        assert_eq!(export.results.duration, "2.3s");
        assert_eq!(export.results.accuracy, "92%");
        assert!(export.results.swing_movement.is_none());
        assert_eq!(export.file_name(), "freekick-analysis-session-9-x.json");
    }

    #[test]
    fn bowling_export_carries_bowling_fields_only() {
        let result = AnalysisResult {
            session_id: "cricket-9-x".into(),
            analysis_type: Some(CricketDiscipline::Bowling),
            swing_movement: Some(4.1),
            bounce_height: Some(80.0),
            seam_position: Some(SeamPosition::Upright),
            shot_type: Some(ShotType::Pull),
            ..Default::default()
        };

        let export = ResultExport::from(&result);
        assert_eq!(export.results.swing_movement.as_deref(), Some("4.1°"));
        assert_eq!(export.results.bounce_height.as_deref(), Some("80cm"));
        assert!(export.results.shot_type.is_none());
        assert_eq!(export.file_name(), "cricket-analysis-cricket-9-x.json");

        let json = export.to_json_pretty().unwrap();
        assert!(json.contains("\"analysisType\": \"bowling\""));
    }
}
