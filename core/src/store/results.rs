use crate::model::AnalysisResult;
use crate::prelude::{AnalysisError, AnalysisKind, PipelineResult};
use crate::store::fallback::demo_result;
use crate::store::kv::KeyValueStore;
use rand::Rng;
use std::sync::Arc;

/// Key family a result is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultNamespace {
    Analysis,
    CricketAnalysis,
}

impl ResultNamespace {
    pub fn for_kind(kind: AnalysisKind) -> Self {
        if kind.is_cricket() {
            ResultNamespace::CricketAnalysis
        } else {
            ResultNamespace::Analysis
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            ResultNamespace::Analysis => "analysis_",
            ResultNamespace::CricketAnalysis => "cricket_analysis_",
        }
    }

    pub fn key(self, session_id: &str) -> String {
        format!("{}{}", self.prefix(), session_id)
    }
}

/// Outcome of a results-page lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultLookup {
    Stored(AnalysisResult),
    Demo(AnalysisResult),
}

impl ResultLookup {
    pub fn is_demo(&self) -> bool {
        matches!(self, ResultLookup::Demo(_))
    }

    pub fn result(&self) -> &AnalysisResult {
        match self {
            ResultLookup::Stored(result) | ResultLookup::Demo(result) => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            ResultLookup::Stored(result) | ResultLookup::Demo(result) => result,
        }
    }
}

/// JSON persistence of results over a key/value backend, one namespace per store.
#[derive(Clone)]
pub struct ResultStore {
    backend: Arc<dyn KeyValueStore>,
    namespace: ResultNamespace,
}

impl ResultStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, namespace: ResultNamespace) -> Self {
        Self { backend, namespace }
    }

    pub fn namespace(&self) -> ResultNamespace {
        self.namespace
    }

    /// Serializes under `<prefix><sessionId>`, silently replacing any previous entry.
    pub fn save(&self, result: &AnalysisResult) -> PipelineResult<()> {
        let payload = serde_json::to_string(result)?;
        self.backend
            .set(&self.namespace.key(&result.session_id), &payload)
    }

    /// `Ok(None)` when nothing is stored for `session_id`.
    pub fn get(&self, session_id: &str) -> PipelineResult<Option<AnalysisResult>> {
        match self.backend.get(&self.namespace.key(session_id))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn require(&self, session_id: &str) -> PipelineResult<AnalysisResult> {
        self.get(session_id)?
            .ok_or_else(|| AnalysisError::ResultNotFound(session_id.to_string()))
    }

    /// Stored record, or a freshly synthesized demo record when absent.
    pub fn lookup_or_demo<R: Rng + ?Sized>(
        &self,
        session_id: &str,
        demo_video_url: Option<&str>,
        rng: &mut R,
    ) -> PipelineResult<ResultLookup> {
        Ok(match self.get(session_id)? {
            Some(result) => ResultLookup::Stored(result),
            None => ResultLookup::Demo(demo_result(
                self.namespace,
                session_id,
                demo_video_url,
                rng,
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CricketDiscipline, TrajectoryPoint};
    use crate::store::kv::MemoryStore;
    use rand::{rngs::StdRng, SeedableRng};

    fn store(namespace: ResultNamespace) -> (Arc<MemoryStore>, ResultStore) {
        let backend = Arc::new(MemoryStore::new());
        let store = ResultStore::new(backend.clone(), namespace);
        (backend, store)
    }

    #[test]
    fn save_uses_namespaced_key_and_overwrites() {
        let (backend, results) = store(ResultNamespace::CricketAnalysis);
        let mut result = AnalysisResult {
            session_id: "cricket-5-abc".into(),
            analysis_type: Some(CricketDiscipline::Bowling),
            max_speed: 130.0,
            avg_speed: 110.0,
            ..Default::default()
        };
        results.save(&result).unwrap();
        result.max_speed = 140.0;
        results.save(&result).unwrap();

        assert_eq!(backend.len(), 1);
        assert!(backend
            .get("cricket_analysis_cricket-5-abc")
            .unwrap()
            .is_some());
        assert_eq!(results.require("cricket-5-abc").unwrap().max_speed, 140.0);
    }

    #[test]
    fn get_round_trips_fractional_values_exactly() {
        let (_, results) = store(ResultNamespace::Analysis);
        let result = AnalysisResult {
            session_id: "session-1-xyz".into(),
            max_speed: 61.3,
            avg_speed: 47.123456789,
            processing_time: 3.141592653589793,
            trajectory_points: 1,
            trajectory_data: Some(vec![TrajectoryPoint::new(101.7, 288.25, 0.0, 46.9)]),
            processed_video_url: Some("file:///clips/kick.webm".into()),
            ..Default::default()
        };
        results.save(&result).unwrap();
        assert_eq!(results.get("session-1-xyz").unwrap(), Some(result));
    }

    #[test]
    fn missing_session_is_absent_not_an_error() {
        let (_, results) = store(ResultNamespace::Analysis);
        assert!(results.get("session-404").unwrap().is_none());
        assert!(matches!(
            results.require("session-404"),
            Err(AnalysisError::ResultNotFound(_))
        ));
    }

    #[test]
    fn lookup_falls_back_to_demo_without_storing_it() {
        let (backend, results) = store(ResultNamespace::Analysis);
        let mut rng = StdRng::seed_from_u64(3);
        let lookup = results
            .lookup_or_demo("session-404", None, &mut rng)
            .unwrap();
        assert!(lookup.is_demo());
        assert_eq!(lookup.result().session_id, "session-404");
        assert!(lookup.result().ball_detected);
        assert!(backend.is_empty());
    }
}
