use crate::prelude::Pace;
use std::future::Future;
use std::time::Duration;

/// Real sleeps on the tokio timer, stretched or shrunk by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokioPace {
    scale: f64,
}

impl TokioPace {
    pub fn realtime() -> Self {
        Self { scale: 1.0 }
    }

    /// A non-positive or non-finite scale disables sleeping altogether.
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for TokioPace {
    fn default() -> Self {
        Self::realtime()
    }
}

impl Pace for TokioPace {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        let scaled = duration.mul_f64(self.scale);
        async move {
            if !scaled.is_zero() {
                tokio::time::sleep(scaled).await;
            }
        }
    }
}

/// Zero-delay pace for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPace;

impl Pace for InstantPace {
    fn pause(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}
