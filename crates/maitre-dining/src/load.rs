//! Kitchen load signal.

/// Source of the restaurant's current load, 0–100.
///
/// The admission check treats load as an external, time-varying signal; the
/// trait keeps the source pluggable (a fixed value for tests and demos, a
/// real occupancy metric in a deployment).
pub trait LoadSignal: Send + Sync {
    /// Current load on the kitchen, 0 (idle) to 100 (slammed).
    fn current_load(&self) -> u8;
}

/// A constant load value.
#[derive(Debug, Clone, Copy)]
pub struct FixedLoad(pub u8);

impl LoadSignal for FixedLoad {
    fn current_load(&self) -> u8 {
        self.0
    }
}
