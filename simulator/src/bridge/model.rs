use athletehub_core::{AnalysisKind, AnalysisResult, ResultLookup};
use serde::{Deserialize, Serialize};

/// Body of a results-page response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsView {
    pub result: AnalysisResult,
    /// True when no stored record existed and a demo record was synthesized.
    pub demo: bool,
}

impl From<ResultLookup> for ResultsView {
    fn from(lookup: ResultLookup) -> Self {
        let demo = lookup.is_demo();
        Self {
            result: lookup.into_result(),
            demo,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub kind: AnalysisKind,
    pub size_bytes: u64,
}
