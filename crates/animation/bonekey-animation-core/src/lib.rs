//! Bonekey Animation Core
//!
//! Skeletal animation playback: clips loaded from a parsed animation source,
//! a pool of playing instances with generation-checked handles, and per-bone
//! sampling of position/rotation at each instance's playback time.
//!
//! ```
//! use bonekey_animation_core::{Config, Engine, JsonSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = r#"{ "tracks": [ { "duration": 4.0, "channels": [
//!     { "node": "spine",
//!       "positionKeys": [[0, 0, 0], [0, 1, 0]],
//!       "rotationKeys": [[0, 0, 0, 1]] } ] } ] }"#;
//!
//! let mut engine = Engine::new(Config::default());
//! engine.load("walk", &JsonSource(scene))?;
//! let walk = engine.play("walk")?;
//! engine.update(0.5);
//! let spine = engine.sample_channel(walk, "spine")?;
//! # let _ = spine;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod ids;
pub mod interp;
pub mod library;
pub mod pool;
pub mod sampling;
pub mod source;

// Re-exports for consumers (renderers, skinning)
pub use config::Config;
pub use data::{AnimationClip, KeyframeChannel};
pub use engine::Engine;
pub use error::{LoadError, PlayError, SampleError};
pub use ids::InstanceHandle;
pub use library::ClipLibrary;
pub use pool::{AnimationInstance, InstancePool};
pub use sampling::{sample_channel, sample_pose, ChannelSample};
pub use source::{
    parse_scene_json, AnimationSource, JsonSource, SourceChannel, SourceScene, SourceTrack,
};
