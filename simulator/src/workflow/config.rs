use anyhow::Context;
use athletehub_core::pipeline::ProfileTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Driver settings, loaded from YAML or assembled from CLI flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Directory for file-backed results; in-memory when unset.
    pub store_dir: Option<PathBuf>,
    /// Multiplier on scripted delays. `1.0` is real time, `0.0` skips them.
    pub pace_scale: f64,
    pub seed: Option<u64>,
    pub bind: SocketAddr,
    /// Base URL of the external live-detection service, if one is deployed.
    pub detection_url: Option<String>,
    pub demo_video_url: Option<String>,
    pub profiles: ProfileTable,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            pace_scale: 1.0,
            seed: None,
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
            detection_url: None,
            demo_video_url: None,
            profiles: ProfileTable::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(store_dir: Option<PathBuf>, pace_scale: f64, seed: Option<u64>) -> Self {
        Self {
            store_dir,
            pace_scale,
            seed,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_defaults() {
        let cfg = WorkflowConfig::from_args(None, 0.0, Some(4));
        assert_eq!(cfg.seed, Some(4));
        assert_eq!(cfg.bind.port(), 9000);
        assert!(cfg.detection_url.is_none());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"store_dir: /tmp/athletehub\npace_scale: 0.25\nbind: 0.0.0.0:8088\ndetection_url: http://detector.local:5000\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.pace_scale, 0.25);
        assert_eq!(cfg.bind.port(), 8088);
        assert_eq!(cfg.store_dir, Some(PathBuf::from("/tmp/athletehub")));
        assert_eq!(cfg.profiles, ProfileTable::default());
    }

    #[test]
    fn config_load_overrides_single_profile() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"
profiles:
  freekick:
    base_speed: 50.0
    accuracy: { min: 90.0, max: 100.0 }
"#,
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.profiles.freekick.base_speed, 50.0);
        assert_eq!(cfg.profiles.freekick.accuracy.min, 90.0);
        assert_eq!(cfg.profiles.freekick.speed_floor, 30.0);
        assert_eq!(cfg.profiles.cricket_bowling.base_speed, 120.0);
    }
}
