//! Construction-time configuration for a counter instance.

use serde::{Deserialize, Serialize};

/// Options accepted at construction. Every field can be changed later
/// through the controller's setters; invalid setter input falls back to
/// these defaults.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Starting value of the counter.
    pub value: i64,
    /// Amount added on each automatic or manual step.
    pub increment: i64,
    /// Interval between automatic steps, in milliseconds. Must be > 0.
    pub pace_ms: u64,
    /// Start ticking immediately.
    pub auto: bool,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            value: 0,
            increment: 1,
            pace_ms: 1000,
            auto: true,
        }
    }
}
