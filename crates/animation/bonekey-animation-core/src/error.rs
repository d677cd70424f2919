//! Error types for clip loading, playback and sampling.

use serde::{Deserialize, Serialize};

use crate::ids::InstanceHandle;

/// Failure to turn an animation source into a clip.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoadError {
    /// The source could not be opened or parsed
    #[error("Animation source unreadable: {reason}")]
    SourceUnreadable { reason: String },

    /// The source parsed but holds no animation tracks
    #[error("Animation source contains no animation tracks")]
    NoAnimationData,

    /// Track duration is zero, negative or not finite
    #[error("Invalid clip duration: {duration}")]
    InvalidDuration { duration: f32 },

    /// A channel without position or rotation keys
    #[error("Channel '{node_name}' has no position or rotation keys")]
    EmptyChannel { node_name: String },
}

/// Failure to start or stop an instance.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayError {
    #[error("Clip not found: {name}")]
    UnknownClip { name: String },

    /// Out of range, already stopped, or stale after slot reuse
    #[error("Invalid instance handle: {handle}")]
    InvalidHandle { handle: InstanceHandle },
}

/// Failure to sample a channel of an instance.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SampleError {
    #[error("Invalid instance handle: {handle}")]
    InvalidHandle { handle: InstanceHandle },

    #[error("Channel not found: {node_name}")]
    UnknownChannel { node_name: String },
}
