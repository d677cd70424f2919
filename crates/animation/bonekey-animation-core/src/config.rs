//! Core configuration for bonekey-animation-core.

use serde::{Deserialize, Serialize};

/// Configuration for engine sizing and load-time diagnostics.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hint for the instance slot table.
    pub instance_capacity: usize,
    /// Initial capacity hint for the clip library.
    pub clip_capacity: usize,
    /// Emit a warning when a clip carries two channels for the same node.
    pub warn_on_duplicate_channels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance_capacity: 64,
            clip_capacity: 16,
            warn_on_duplicate_channels: true,
        }
    }
}
