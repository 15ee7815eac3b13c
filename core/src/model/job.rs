use crate::prelude::AnalysisKind;
use crate::session::SessionIdGenerator;

/// What the capture collaborator hands over: a byte count and, optionally,
/// a URI the results page can play back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoInput {
    pub size_bytes: u64,
    pub uri: Option<String>,
}

impl VideoInput {
    pub fn new(size_bytes: u64) -> Self {
        Self {
            size_bytes,
            uri: None,
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// A single in-flight run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisJob {
    pub session_id: String,
    pub kind: AnalysisKind,
    pub input_size_bytes: u64,
    pub source_uri: Option<String>,
}

impl AnalysisJob {
    /// Mints a fresh session id for `kind`.
    pub fn new(kind: AnalysisKind, input: VideoInput) -> Self {
        let session_id = SessionIdGenerator::generate(kind.session_prefix());
        Self::with_session(session_id, kind, input)
    }

    pub fn with_session(session_id: impl Into<String>, kind: AnalysisKind, input: VideoInput) -> Self {
        Self {
            session_id: session_id.into(),
            kind,
            input_size_bytes: input.size_bytes,
            source_uri: input.uri,
        }
    }
}
