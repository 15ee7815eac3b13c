pub mod probe;

pub use probe::DetectionProbe;
