pub mod stats;

pub use stats::{Span, StatsHelper};
