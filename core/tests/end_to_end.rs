use athletehub_core::model::{SeamPosition, Stage, VideoInput};
use athletehub_core::pipeline::{InstantPace, MockSynthesizer};
use athletehub_core::prelude::ChannelSink;
use athletehub_core::store::{FileStore, KeyValueStore, MemoryStore};
use athletehub_core::{AnalysisKind, Analyzer, ProgressEvent, ResultNamespace};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn freekick_upload_and_analyze() {
    let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let analyzer = Analyzer::new(InstantPace, MockSynthesizer::from_entropy(), backend.clone());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut sink = ChannelSink::new(tx);

    for size in [1u64, 250_000, 5_242_880] {
        let result = analyzer
            .analyze(
                AnalysisKind::Freekick,
                VideoInput::new(size),
                &mut sink,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(result.session_id.starts_with("session-"));
        assert!(result.max_speed >= 30.0);
        assert!(result.avg_speed <= result.max_speed);
        assert!(result.avg_speed >= 0.7 * result.max_speed - 0.2);
        assert!(result.avg_speed <= 0.9 * result.max_speed + 0.2);
        let data = result.trajectory_data.as_ref().unwrap();
        assert_eq!(data.len(), result.trajectory_points as usize);
        assert!((20..=59).contains(&data.len()));
        assert!(result.accuracy <= 100);

        let events = drain(&mut rx);
        assert!(events
            .windows(2)
            .all(|pair| pair[0].progress <= pair[1].progress));
        let last = events.last().unwrap();
        assert_eq!(last.stage, Stage::Complete);
        assert_eq!(last.progress, 100);

        assert!(backend
            .get(&format!("analysis_{}", result.session_id))
            .unwrap()
            .is_some());
    }
}

#[tokio::test]
async fn cricket_bowling_scenario() {
    let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let analyzer = Analyzer::new(InstantPace, MockSynthesizer::from_entropy(), backend.clone());
    let mut sink = |_: &ProgressEvent| {};

    let result = analyzer
        .analyze(
            AnalysisKind::CricketBowling,
            VideoInput::new(777_777),
            &mut sink,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["analysisType"], "bowling");
    let swing = result.swing_movement.unwrap();
    assert!((0.0..15.0).contains(&swing));
    assert!(SeamPosition::ALL.contains(&result.seam_position.unwrap()));
    let bounce = result.bounce_height.unwrap();
    assert!((60.0..100.0).contains(&bounce));
    assert!(backend
        .get(&format!("cricket_analysis_{}", result.session_id))
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn results_survive_a_file_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let session_id = {
        let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        let analyzer = Analyzer::new(InstantPace, MockSynthesizer::seeded(5), backend);
        let mut sink = |_: &ProgressEvent| {};
        analyzer
            .analyze(
                AnalysisKind::CricketBatting,
                VideoInput::new(4_000),
                &mut sink,
                &CancellationToken::new(),
            )
            .await
            .unwrap()
            .session_id
    };

    let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let analyzer = Analyzer::new(InstantPace, MockSynthesizer::seeded(6), backend);
    let lookup = analyzer
        .lookup(ResultNamespace::CricketAnalysis, &session_id)
        .unwrap();
    assert!(!lookup.is_demo());
    assert!(lookup.result().shot_type.is_some());

    let missing = analyzer.lookup_any("session-1-unknown").unwrap();
    assert!(missing.is_demo());
    assert!(missing.result().ball_detected);
}
