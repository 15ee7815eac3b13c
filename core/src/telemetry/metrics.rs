use serde::Serialize;
use std::sync::Mutex;

/// Process-wide run counters.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub fallbacks: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_completed(&self) {
        self.update(|m| m.completed += 1);
    }

    pub fn record_failed(&self) {
        self.update(|m| m.failed += 1);
    }

    pub fn record_cancelled(&self) {
        self.update(|m| m.cancelled += 1);
    }

    pub fn record_fallback(&self) {
        self.update(|m| m.fallbacks += 1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }

    fn update(&self, apply: impl FnOnce(&mut MetricsSnapshot)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
