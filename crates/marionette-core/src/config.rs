//! Core configuration for marionette-core.

use serde::{Deserialize, Serialize};

/// Configuration for player sizing and safety limits.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum nesting depth for embedded entity instances. Exceeding it is
    /// treated as a data-integrity error (self-referencing assets).
    pub max_instance_depth: usize,

    /// Initial capacity hints for the per-player snapshot buffers.
    pub visuals_capacity: usize,
    pub bones_capacity: usize,
    pub events_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_instance_depth: 8,
            visuals_capacity: 64,
            bones_capacity: 32,
            events_capacity: 16,
        }
    }
}
